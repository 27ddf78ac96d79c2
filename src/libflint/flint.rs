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

//! Rounded floating point interval value.
//!
//! A [`Flint`] is a closed interval `[lo, hi]` over `f64` bounds that encloses the exact real
//! result of a computation. Every operation rounds the lower bound toward `-inf` and the upper
//! bound toward `+inf` (see the [round](crate::round) module), so the true result can never
//! escape the interval, only the interval can grow wider than necessary.
//!
//! Failures are carried in-band by the [`Status`] tag instead of a separate error channel:
//! a `Flint` stays a plain 24-byte `Copy` value that can live in bulk numeric containers.
//! `Undefined` (domain errors) and `Nan` (contamination by non-finite outside input) are
//! absorbing, like NaN in plain floating point.
//!
//! `==` on `Flint` is *representation* equality: bitwise on `(lo, hi, status)`, so two
//! `Undefined` values compare equal and any value equals itself. The mathematical, possibly
//! indeterminate comparison lives in [`TriOrd`](crate::cmp::TriOrd).

use crate::ops::{Disjoint, Hull, Intersection};
use crate::round;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Validity tag of a [`Flint`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
  /// `lo <= hi`, neither bound NaN. Bounds may be infinite after conservative saturation.
  Valid,
  /// Valid and degenerate: `lo == hi`, an exactly known point.
  Point,
  /// Result of an operation outside its mathematical domain.
  Undefined,
  /// Contaminated by a non-finite outside input or an indeterminate form.
  Nan,
}

/// Largest integer magnitude below which every `i64` is exactly representable in `f64`.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_991.0;

#[repr(C)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "FlintBits")]
pub struct Flint {
  pub(crate) lo: f64,
  pub(crate) hi: f64,
  pub(crate) status: Status,
}

/// Raw wire form of a [`Flint`]: promoted through validation so a forged payload cannot
/// smuggle unordered or NaN bounds under a valid tag. Infinite bounds are accepted, since
/// saturated and clipped results legitimately carry them.
#[derive(Deserialize)]
#[serde(rename = "Flint")]
struct FlintBits {
  lo: f64,
  hi: f64,
  status: Status,
}

impl TryFrom<FlintBits> for Flint
{
  type Error = String;

  fn try_from(raw: FlintBits) -> Result<Flint, String> {
    match raw.status {
      Status::Undefined => Ok(Flint::undefined()),
      Status::Nan => Ok(Flint::nan()),
      Status::Valid | Status::Point => {
        if raw.lo.is_nan() || raw.hi.is_nan() {
          Err(String::from("NaN bound on a valid interval"))
        }
        else if raw.lo > raw.hi {
          Err(format!("unordered bounds [{}, {}]", raw.lo, raw.hi))
        }
        else {
          Ok(Flint::from_bounds(raw.lo, raw.hi))
        }
      }
    }
  }
}

impl Flint
{
  /// Builds an interval from explicit bounds.
  ///
  /// A NaN or infinite bound yields a [`Status::Nan`] value, `lo > hi` yields
  /// [`Status::Undefined`]. Neither failure aborts; both are ordinary values.
  pub fn new(lo: f64, hi: f64) -> Flint {
    if !lo.is_finite() || !hi.is_finite() {
      Flint::nan()
    }
    else if lo > hi {
      Flint::undefined()
    }
    else {
      Flint::from_bounds(lo, hi)
    }
  }

  /// The degenerate interval `[x, x]`, an exactly known point.
  pub fn point(x: f64) -> Flint {
    if !x.is_finite() { Flint::nan() } else { Flint::from_bounds(x, x) }
  }

  /// The smallest interval strictly surrounding `x`, one ulp on each side.
  ///
  /// Use this instead of [`Flint::point`] when the scalar is itself the rounded image of some
  /// real value, e.g. a parsed decimal literal.
  pub fn around(x: f64) -> Flint {
    if !x.is_finite() { Flint::nan() } else { Flint::from_bounds(x.next_down(), x.next_up()) }
  }

  /// Promotes an integer: exact when representable in `f64`, widened one ulp outward beyond
  /// `2^53` where the conversion itself rounds.
  pub fn from_int(i: i64) -> Flint {
    let d = i as f64;
    if d.abs() > MAX_EXACT_INT {
      Flint::from_bounds(d.next_down(), d.next_up())
    }
    else {
      Flint::from_bounds(d, d)
    }
  }

  /// The absorbing domain-error value.
  pub fn undefined() -> Flint {
    Flint { lo: f64::NAN, hi: f64::NAN, status: Status::Undefined }
  }

  /// The absorbing contamination value.
  pub fn nan() -> Flint {
    Flint { lo: f64::NAN, hi: f64::NAN, status: Status::Nan }
  }

  /// Internal constructor for bounds already known to be ordered and non-NaN.
  ///
  /// Negative zero is normalized so that representation equality can be bitwise.
  pub(crate) fn from_bounds(lo: f64, hi: f64) -> Flint {
    debug_assert!(!lo.is_nan() && !hi.is_nan());
    debug_assert!(lo <= hi, "unordered bounds [{}, {}]", lo, hi);
    let lo = if lo == 0.0 { 0.0 } else { lo };
    let hi = if hi == 0.0 { 0.0 } else { hi };
    let status = if lo == hi { Status::Point } else { Status::Valid };
    Flint { lo, hi, status }
  }

  pub fn lower(self) -> f64 { self.lo }
  pub fn upper(self) -> f64 { self.hi }
  pub fn status(self) -> Status { self.status }

  /// True for `Valid` and `Point` values, false for the absorbing states.
  pub fn is_valid(self) -> bool {
    matches!(self.status, Status::Valid | Status::Point)
  }

  pub fn is_point(self) -> bool {
    self.status == Status::Point
  }

  pub fn is_undefined(self) -> bool {
    self.status == Status::Undefined
  }

  pub fn is_nan(self) -> bool {
    self.status == Status::Nan
  }

  /// Both bounds finite; false for saturated or clipped results such as `tan` over a pole.
  pub fn is_finite(self) -> bool {
    self.is_valid() && self.lo.is_finite() && self.hi.is_finite()
  }

  /// The interval certainly excludes zero.
  pub fn is_nonzero(self) -> bool {
    self.is_valid() && (self.lo > 0.0 || self.hi < 0.0)
  }

  /// Membership of a scalar. Always false on `Undefined` and `Nan` values.
  pub fn contains(self, x: f64) -> bool {
    self.is_valid() && self.lo <= x && x <= self.hi
  }

  pub fn is_subset_of(self, other: Flint) -> bool {
    self.is_valid() && other.is_valid() && self.lo >= other.lo && self.hi <= other.hi
  }

  /// Upper bound on the interval width, rounded up. NaN on absorbing states.
  pub fn width(self) -> f64 {
    if self.is_valid() { round::sub_up(self.hi, self.lo) } else { f64::NAN }
  }

  /// Scalar estimate of the enclosed value: the midpoint of the bounds.
  ///
  /// NaN on absorbing states and on intervals unbounded on both sides; an interval
  /// unbounded on one side propagates its infinite bound.
  pub fn midpoint(self) -> f64 {
    if self.is_valid() { 0.5 * self.lo + 0.5 * self.hi } else { f64::NAN }
  }

  /// The reciprocal interval `[1/hi, 1/lo]`.
  ///
  /// `Undefined` when the interval contains zero, including as a bound: the true image would
  /// be two disjoint unbounded rays, which a single convex interval cannot represent.
  pub fn recip(self) -> Flint {
    if !self.is_valid() { return self; }
    if self.lo <= 0.0 && self.hi >= 0.0 { return Flint::undefined(); }
    Flint::from_bounds(round::div_down(1.0, self.hi), round::div_up(1.0, self.lo))
  }

  /// Absolute value: folds the interval at zero.
  pub fn abs(self) -> Flint {
    if !self.is_valid() { return self; }
    if self.hi < 0.0 {
      -self
    }
    else if self.lo < 0.0 {
      Flint::from_bounds(0.0, (-self.lo).max(self.hi))
    }
    else {
      self
    }
  }

  /// Magnitude of `self` carrying the sign of `sign`.
  ///
  /// When `sign` straddles zero the sign is not decided, so the result is the hull of both
  /// signed images.
  pub fn copysign(self, sign: Flint) -> Flint {
    match taint(self, sign) {
      Some(t) => t,
      None => {
        let m = self.abs();
        if sign.lo >= 0.0 {
          m
        }
        else if sign.hi < 0.0 {
          -m
        }
        else {
          Flint::from_bounds(-m.hi, m.hi)
        }
      }
    }
  }
}

/// Absorption rule for binary operations: `Nan` dominates `Undefined` dominates computation.
pub(crate) fn taint(a: Flint, b: Flint) -> Option<Flint> {
  match (a.status, b.status) {
    (Status::Nan, _) | (_, Status::Nan) => Some(Flint::nan()),
    (Status::Undefined, _) | (_, Status::Undefined) => Some(Flint::undefined()),
    _ => None,
  }
}

fn min4(a: f64, b: f64, c: f64, d: f64) -> f64 {
  a.min(b).min(c.min(d))
}

fn max4(a: f64, b: f64, c: f64, d: f64) -> f64 {
  a.max(b).max(c.max(d))
}

impl Add for Flint
{
  type Output = Flint;

  fn add(self, rhs: Flint) -> Flint {
    match taint(self, rhs) {
      Some(t) => t,
      None => Flint::from_bounds(
        round::add_down(self.lo, rhs.lo),
        round::add_up(self.hi, rhs.hi))
    }
  }
}

impl Sub for Flint
{
  type Output = Flint;

  fn sub(self, rhs: Flint) -> Flint {
    match taint(self, rhs) {
      Some(t) => t,
      None => Flint::from_bounds(
        round::sub_down(self.lo, rhs.hi),
        round::sub_up(self.hi, rhs.lo))
    }
  }
}

impl Mul for Flint
{
  type Output = Flint;

  /// Four-corner products, each corner evaluated in both rounding directions.
  ///
  /// The sign case-split found in other interval libraries is only a shortcut over this
  /// method; the brute-force form is the reference semantics for every sign combination,
  /// including zero-straddling operands.
  fn mul(self, rhs: Flint) -> Flint {
    match taint(self, rhs) {
      Some(t) => t,
      None => {
        let lo = min4(
          round::mul_down(self.lo, rhs.lo),
          round::mul_down(self.lo, rhs.hi),
          round::mul_down(self.hi, rhs.lo),
          round::mul_down(self.hi, rhs.hi));
        let hi = max4(
          round::mul_up(self.lo, rhs.lo),
          round::mul_up(self.lo, rhs.hi),
          round::mul_up(self.hi, rhs.lo),
          round::mul_up(self.hi, rhs.hi));
        Flint::from_bounds(lo, hi)
      }
    }
  }
}

impl Div for Flint
{
  type Output = Flint;

  /// Multiplication by the reciprocal interval; `Undefined` when `rhs` contains zero.
  fn div(self, rhs: Flint) -> Flint {
    match taint(self, rhs) {
      Some(t) => t,
      None => self * rhs.recip()
    }
  }
}

impl Neg for Flint
{
  type Output = Flint;

  /// Exact bound swap, no rounding.
  fn neg(self) -> Flint {
    if !self.is_valid() { return self; }
    Flint::from_bounds(-self.hi, -self.lo)
  }
}

macro_rules! scalar_ops_impl
{
  ( $( $Op: ident, $op: ident ),* ) =>
  {$(
    impl $Op<f64> for Flint
    {
      type Output = Flint;

      fn $op(self, rhs: f64) -> Flint {
        self.$op(Flint::point(rhs))
      }
    }

    impl $Op<Flint> for f64
    {
      type Output = Flint;

      fn $op(self, rhs: Flint) -> Flint {
        Flint::point(self).$op(rhs)
      }
    }
  )*}
}

scalar_ops_impl!(Add, add, Sub, sub, Mul, mul, Div, div);

macro_rules! assign_ops_impl
{
  ( $( $Op: ident, $op: ident, $base: ident ),* ) =>
  {$(
    impl $Op for Flint
    {
      fn $op(&mut self, rhs: Flint) {
        *self = (*self).$base(rhs);
      }
    }

    impl $Op<f64> for Flint
    {
      fn $op(&mut self, rhs: f64) {
        *self = (*self).$base(rhs);
      }
    }
  )*}
}

assign_ops_impl!(
  AddAssign, add_assign, add,
  SubAssign, sub_assign, sub,
  MulAssign, mul_assign, mul,
  DivAssign, div_assign, div);

impl From<f64> for Flint
{
  fn from(x: f64) -> Flint { Flint::point(x) }
}

impl From<i64> for Flint
{
  fn from(i: i64) -> Flint { Flint::from_int(i) }
}

impl From<i32> for Flint
{
  fn from(i: i32) -> Flint { Flint::from_int(i as i64) }
}

/// Bitwise equality of `(lo, hi, status)`.
///
/// This is equality of representations, not of mathematical values: `undefined() ==
/// undefined()` holds, and two overlapping intervals with different bounds do not. The
/// three-valued mathematical comparison is [`TriOrd`](crate::cmp::TriOrd).
impl PartialEq for Flint
{
  fn eq(&self, other: &Flint) -> bool {
    self.status == other.status
      && self.lo.to_bits() == other.lo.to_bits()
      && self.hi.to_bits() == other.hi.to_bits()
  }
}

impl Eq for Flint {}

impl Zero for Flint
{
  fn zero() -> Flint { Flint::point(0.0) }

  fn is_zero(&self) -> bool {
    self.status == Status::Point && self.lo == 0.0
  }
}

impl One for Flint
{
  fn one() -> Flint { Flint::point(1.0) }
}

impl Hull for Flint
{
  type Output = Flint;

  fn hull(&self, rhs: &Flint) -> Flint {
    match taint(*self, *rhs) {
      Some(t) => t,
      None => Flint::from_bounds(self.lo.min(rhs.lo), self.hi.max(rhs.hi))
    }
  }
}

impl Intersection for Flint
{
  type Output = Flint;

  /// `Undefined` when the intervals are disjoint: the empty set is not representable.
  fn intersect(&self, rhs: &Flint) -> Flint {
    match taint(*self, *rhs) {
      Some(t) => t,
      None => {
        let lo = self.lo.max(rhs.lo);
        let hi = self.hi.min(rhs.hi);
        if lo > hi { Flint::undefined() } else { Flint::from_bounds(lo, hi) }
      }
    }
  }
}

impl Disjoint for Flint
{
  /// Only meaningful between valid operands; absorbing states are never disjoint from
  /// anything because nothing can be certified about them.
  fn is_disjoint(&self, rhs: &Flint) -> bool {
    self.is_valid() && rhs.is_valid() && (self.hi < rhs.lo || rhs.hi < self.lo)
  }
}

impl fmt::Display for Flint
{
  fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
    match self.status {
      Status::Undefined => formatter.write_str("undefined"),
      Status::Nan => formatter.write_str("nan"),
      Status::Point => write!(formatter, "{}", self.lo),
      Status::Valid => write!(formatter, "[{}, {}]", self.lo, self.hi),
    }
  }
}
