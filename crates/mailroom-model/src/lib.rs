// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Mailroom Model
//!
//! **The domain model shared by the mailroom batch selector and its orchestrator.**
//!
//! This crate holds the plain data types and the collaborator contracts the
//! selection engine is written against. It owns no search logic; the
//! `mailroom_batch` crate consumes these types read-only and the
//! `mailroom_sorter` crate drives them.
//!
//! ## Architecture
//!
//! * **`num`**: The `MailNumeric` trait alias for the signed integers used as floors and ticks.
//! * **`index`**: `MailId`, the opaque identifier handed out by the mail generator.
//! * **`mail`**: `MailItem` and `PriorityLevel`, immutable once created.
//! * **`building`**: Floor range, mailroom location and the `FloorSide` direction rules.
//! * **`clock`**: The `Clock` contract plus a manually advanced `SimulationClock`.
//! * **`tube`**: The `TransportBuffer` contract and the `StorageTube` the robot carries.
//!
//! ## Design Philosophy
//!
//! 1.  **Generic Coordinates**: Floors and ticks are generic over any signed primitive integer.
//! 2.  **Fail-Fast**: Constructors validate eagerly so the selector never sees a malformed item or building.
//! 3.  **No Lost Items**: Fallible insertions hand the rejected item back to the caller.

pub mod building;
pub mod clock;
pub mod index;
pub mod mail;
pub mod num;
pub mod tube;
