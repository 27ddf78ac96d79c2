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

//! Three-valued ordering of intervals.
//!
//! Two overlapping intervals do not decide an order between all of their representative
//! values, so every predicate answers in Kleene's strong three-valued logic
//! ([`SKleene`]): `True` means the predicate holds for *every* pair of representatives,
//! `False` means it holds for none, `Unknown` means the intervals overlap (or an operand is
//! `Undefined`/`Nan` and nothing can be certified).
//!
//! Boundary convention, applied consistently across all six predicates: a *strict* predicate
//! requires strict separation of the bounds, a *non-strict* predicate accepts touching
//! bounds. So `[1,2].tri_lt([2,3])` is `Unknown` (both could be exactly 2) while
//! `[1,2].tri_le([2,3])` is `True`. Equality is only certain between two equal points;
//! overlapping non-degenerate intervals answer `Unknown`.
//!
//! Collapsing an `SKleene` to `bool` is a lossy decision that belongs to the caller; this
//! module never does it.

use crate::flint::Flint;
use trilean::SKleene;

pub trait TriOrd<RHS = Self>
{
  fn tri_lt(&self, rhs: &RHS) -> SKleene;
  fn tri_le(&self, rhs: &RHS) -> SKleene;
  fn tri_gt(&self, rhs: &RHS) -> SKleene;
  fn tri_ge(&self, rhs: &RHS) -> SKleene;
  fn tri_eq(&self, rhs: &RHS) -> SKleene;
  fn tri_ne(&self, rhs: &RHS) -> SKleene;
}

impl TriOrd for Flint
{
  fn tri_lt(&self, rhs: &Flint) -> SKleene {
    if !self.is_valid() || !rhs.is_valid() { return SKleene::Unknown; }
    if self.upper() < rhs.lower() { SKleene::True }
    else if self.lower() >= rhs.upper() { SKleene::False }
    else { SKleene::Unknown }
  }

  fn tri_le(&self, rhs: &Flint) -> SKleene {
    if !self.is_valid() || !rhs.is_valid() { return SKleene::Unknown; }
    if self.upper() <= rhs.lower() { SKleene::True }
    else if self.lower() > rhs.upper() { SKleene::False }
    else { SKleene::Unknown }
  }

  fn tri_gt(&self, rhs: &Flint) -> SKleene {
    rhs.tri_lt(self)
  }

  fn tri_ge(&self, rhs: &Flint) -> SKleene {
    rhs.tri_le(self)
  }

  fn tri_eq(&self, rhs: &Flint) -> SKleene {
    if !self.is_valid() || !rhs.is_valid() { return SKleene::Unknown; }
    if self.is_point() && rhs.is_point() && self.lower() == rhs.lower() { SKleene::True }
    else if self.upper() < rhs.lower() || self.lower() > rhs.upper() { SKleene::False }
    else { SKleene::Unknown }
  }

  fn tri_ne(&self, rhs: &Flint) -> SKleene {
    match self.tri_eq(rhs) {
      SKleene::True => SKleene::False,
      SKleene::False => SKleene::True,
      SKleene::Unknown => SKleene::Unknown,
    }
  }
}

impl TriOrd<f64> for Flint
{
  fn tri_lt(&self, rhs: &f64) -> SKleene { self.tri_lt(&Flint::point(*rhs)) }
  fn tri_le(&self, rhs: &f64) -> SKleene { self.tri_le(&Flint::point(*rhs)) }
  fn tri_gt(&self, rhs: &f64) -> SKleene { self.tri_gt(&Flint::point(*rhs)) }
  fn tri_ge(&self, rhs: &f64) -> SKleene { self.tri_ge(&Flint::point(*rhs)) }
  fn tri_eq(&self, rhs: &f64) -> SKleene { self.tri_eq(&Flint::point(*rhs)) }
  fn tri_ne(&self, rhs: &f64) -> SKleene { self.tri_ne(&Flint::point(*rhs)) }
}
