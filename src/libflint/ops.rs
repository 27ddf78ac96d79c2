// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Interval specific operations.

pub trait Hull<RHS = Self>
{
  type Output;
  fn hull(&self, rhs: &RHS) -> Self::Output;
}

pub trait Intersection<RHS = Self>
{
  type Output;
  fn intersect(&self, rhs: &RHS) -> Self::Output;
}

pub trait Disjoint<RHS = Self>
{
  fn is_disjoint(&self, rhs: &RHS) -> bool;
}
