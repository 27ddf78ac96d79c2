// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This library proposes a rounded floating point interval type: a [`Flint`] is a closed
//! interval `[lo, hi]` over `f64` bounds that is guaranteed, by construction and through
//! every operation, to contain the exact real result of the computation it tracks. Lower
//! bounds always round toward `-inf` and upper bounds toward `+inf`, so accumulated rounding
//! can only widen an interval, never let the true value escape it.
//!
//! Domain errors and contamination by non-finite inputs are carried in-band by a status tag
//! instead of panics or a separate error channel, which keeps `Flint` a plain `Copy` value
//! suitable for bulk numeric containers. Comparisons are three-valued
//! ([`trilean::SKleene`]): overlapping intervals cannot certify an order.
//!
//! # Examples
//!
//! ```
//! use flint::{Flint, TriOrd};
//! use trilean::SKleene;
//!
//! let a = Flint::point(0.1) + Flint::point(0.2);
//! assert!(a.contains(0.3));
//!
//! assert_eq!(Flint::new(1.0, 2.0).tri_lt(&Flint::new(3.0, 4.0)), SKleene::True);
//! assert_eq!(Flint::new(1.0, 5.0).tri_lt(&Flint::new(3.0, 4.0)), SKleene::Unknown);
//!
//! assert!((Flint::new(1.0, 2.0) / Flint::new(-1.0, 1.0)).is_undefined());
//! ```
//!
//! # References
//! * [Boost Interval Arithmetic Library](http://www.boost.org/doc/libs/1_57_0/libs/numeric/interval/doc/interval.html)
//! * Hickey, Ju, van Emden. *Interval arithmetic: From principles to implementation.* JACM 2001.

pub mod cmp;
pub mod flint;
pub mod ops;
pub mod round;

mod funcs;
#[cfg(test)]
mod properties;

pub use crate::cmp::TriOrd;
pub use crate::flint::{Flint, Status};
pub use crate::ops::{Disjoint, Hull, Intersection};
pub use trilean::SKleene;
