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

//! Interval extensions of the elementary functions.
//!
//! Monotonic functions map the bounds directly, outward-corrected for the libm error
//! ([`round::lib_down`]/[`round::lib_up`]). Functions with a partial domain either fail with
//! `Undefined` (input entirely outside the domain) or clip the invalid portion and evaluate
//! over the valid sub-interval; the clipping policy is documented per function. Periodic
//! functions saturate to their full range once the input spans a period or an interior
//! extremum.
//!
//! Every function preserves the containment guarantee: for all real `x` in the input
//! interval, `f(x)` lies in the output interval.

use crate::flint::{taint, Flint};
use crate::round;

/// Directed enclosure of `pi`, from below and above.
const PI_LO: f64 = 3.141592653589793;
const PI_HI: f64 = 3.1415926535897936;
const TWO_PI_LO: f64 = 6.283185307179586;
const TWO_PI_HI: f64 = 6.283185307179587;
const FRAC_PI_2_LO: f64 = 1.5707963267948966;
const FRAC_PI_2_HI: f64 = 1.5707963267948968;

/// Beyond this magnitude one ulp of the argument is no longer small against a period, so
/// locating the extrema of a periodic function is hopeless and the full range is returned.
const TRIG_ARG_MAX: f64 = 1.0e6;

macro_rules! monotonic_fns
{
  ( $( $(#[$m: meta])* $fname: ident ),* $(,)? ) =>
  {$(
    $(#[$m])*
    pub fn $fname(self) -> Flint {
      if !self.is_valid() { return self; }
      Flint::from_bounds(round::lib_down(self.lo.$fname()), round::lib_up(self.hi.$fname()))
    }
  )*}
}

macro_rules! log_fns
{
  ( $( $(#[$m: meta])* $fname: ident, $min: expr ),* $(,)? ) =>
  {$(
    $(#[$m])*
    pub fn $fname(self) -> Flint {
      if !self.is_valid() { return self; }
      if self.hi <= $min { return Flint::undefined(); }
      let hi = round::lib_up(self.hi.$fname());
      if self.lo <= $min {
        Flint::from_bounds(f64::NEG_INFINITY, hi)
      }
      else {
        Flint::from_bounds(round::lib_down(self.lo.$fname()), hi)
      }
    }
  )*}
}

impl Flint
{
  /// Enclosure of the circle constant.
  pub const PI: Flint = Flint { lo: PI_LO, hi: PI_HI, status: crate::flint::Status::Valid };
  pub const TWO_PI: Flint = Flint { lo: TWO_PI_LO, hi: TWO_PI_HI, status: crate::flint::Status::Valid };
  pub const FRAC_PI_2: Flint = Flint { lo: FRAC_PI_2_LO, hi: FRAC_PI_2_HI, status: crate::flint::Status::Valid };

  /// Square root. An interval entirely below zero is a domain error; an interval straddling
  /// zero is clipped to its non-negative portion, so `sqrt([-1, 4]) = [0, 2]`.
  pub fn sqrt(self) -> Flint {
    if !self.is_valid() { return self; }
    if self.hi < 0.0 { return Flint::undefined(); }
    let hi = round::sqrt_up(self.hi);
    if self.lo < 0.0 {
      Flint::from_bounds(0.0, hi)
    }
    else {
      Flint::from_bounds(round::sqrt_down(self.lo), hi)
    }
  }

  monotonic_fns!(
    /// Cube root, monotonic over the whole line.
    cbrt,
    /// Exponential. The lower bound may underflow to a tiny negative value; the upper bound
    /// saturates to `+inf` on overflow.
    exp,
    /// Base-2 exponential.
    exp2,
    /// `e^x - 1`.
    exp_m1,
    /// Arc tangent, monotonic with range `(-pi/2, pi/2)`.
    atan,
    /// Hyperbolic sine.
    sinh,
    /// Hyperbolic tangent.
    tanh,
    /// Inverse hyperbolic sine.
    asinh,
  );

  log_fns!(
    /// Natural logarithm. Entirely non-positive input is a domain error; an interval
    /// straddling zero clips to `[-inf, ln(hi)]`.
    ln, 0.0,
    /// Base-2 logarithm, same domain policy as [`Flint::ln`].
    log2, 0.0,
    /// Base-10 logarithm, same domain policy as [`Flint::ln`].
    log10, 0.0,
    /// `ln(1 + x)` with domain minimum `-1`.
    ln_1p, -1.0,
  );

  /// Integer power. Even exponents fold the interval at zero; a negative exponent on a
  /// zero-containing interval is `Undefined` (it is a division by zero).
  pub fn powi(self, n: i32) -> Flint {
    if !self.is_valid() { return self; }
    if n == 0 { return Flint::point(1.0); }
    let p = self.powi_pos((n as f64).abs());
    if n < 0 { p.recip() } else { p }
  }

  /// Power with an interval exponent.
  ///
  /// An exponent that is an exact integer point delegates to the integer-power rules, which
  /// accept negative bases and fold zero-straddling ones. Otherwise the base must be
  /// non-negative: an entirely negative base is a domain error and a zero-straddling base is
  /// clipped, like [`Flint::sqrt`]. A zero-containing base with a negative exponent bound is
  /// `Undefined`.
  pub fn pow(self, rhs: Flint) -> Flint {
    if let Some(t) = taint(self, rhs) { return t; }
    if rhs.is_point() && rhs.lo.fract() == 0.0 {
      let e = rhs.lo;
      if e == 0.0 { return Flint::point(1.0); }
      let p = self.powi_pos(e.abs());
      return if e < 0.0 { p.recip() } else { p };
    }
    if self.hi < 0.0 { return Flint::undefined(); }
    let base_lo = if self.lo < 0.0 { 0.0 } else { self.lo };
    if base_lo == 0.0 && rhs.lo < 0.0 { return Flint::undefined(); }
    let c1 = base_lo.powf(rhs.lo);
    let c2 = base_lo.powf(rhs.hi);
    let c3 = self.hi.powf(rhs.lo);
    let c4 = self.hi.powf(rhs.hi);
    if c1.is_nan() || c2.is_nan() || c3.is_nan() || c4.is_nan() {
      return Flint::undefined();
    }
    let lo = round::lib_down(c1.min(c2).min(c3.min(c4))).max(0.0);
    let hi = round::lib_up(c1.max(c2).max(c3.max(c4)));
    Flint::from_bounds(lo, hi)
  }

  /// `x^e` for an exact positive integer `e` (kept as `f64` so that exponents beyond `i32`
  /// keep their parity).
  fn powi_pos(self, e: f64) -> Flint {
    let odd = e % 2.0 == 1.0;
    if odd || self.lo >= 0.0 {
      Flint::from_bounds(powf_down(self.lo, e), powf_up(self.hi, e))
    }
    else if self.hi <= 0.0 {
      // Even power of a non-positive interval is decreasing.
      Flint::from_bounds(powf_down(self.hi, e), powf_up(self.lo, e))
    }
    else {
      // Even power folds at zero.
      Flint::from_bounds(0.0, powf_up((-self.lo).max(self.hi), e))
    }
  }

  /// Euclidean norm `sqrt(x^2 + y^2)`, minimal at the per-axis fold of each operand.
  pub fn hypot(self, rhs: Flint) -> Flint {
    if let Some(t) = taint(self, rhs) { return t; }
    let (xa, xb) = fold_abs(self);
    let (ya, yb) = fold_abs(rhs);
    let lo = xa.hypot(ya);
    let lo = if lo == 0.0 { 0.0 } else { round::lib_down(lo) };
    Flint::from_bounds(lo, round::lib_up(xb.hypot(yb)))
  }

  /// Sine. Saturates to `[-1, 1]` when the input spans a full period or lies beyond the
  /// reliable argument-reduction range; otherwise takes the endpoint values plus `1`/`-1`
  /// for every quarter-turn extremum crossed.
  pub fn sin(self) -> Flint {
    if !self.is_valid() { return self; }
    if self.lo.abs() > TRIG_ARG_MAX || self.hi.abs() > TRIG_ARG_MAX
      || self.hi - self.lo >= TWO_PI_LO {
      return Flint::from_bounds(-1.0, 1.0);
    }
    let sa = self.lo.sin();
    let sb = self.hi.sin();
    let mut lo = round::lib_down(sa.min(sb)).max(-1.0);
    let mut hi = round::lib_up(sa.max(sb)).min(1.0);
    let (m0, m1) = quarter_turns(self.lo, self.hi);
    let mut m = m0;
    while m <= m1 {
      match quadrant(m) {
        1 => hi = 1.0,
        3 => lo = -1.0,
        _ => (),
      }
      m += 1.0;
    }
    Flint::from_bounds(lo, hi)
  }

  /// Cosine, same saturation policy as [`Flint::sin`].
  pub fn cos(self) -> Flint {
    if !self.is_valid() { return self; }
    if self.lo.abs() > TRIG_ARG_MAX || self.hi.abs() > TRIG_ARG_MAX
      || self.hi - self.lo >= TWO_PI_LO {
      return Flint::from_bounds(-1.0, 1.0);
    }
    let ca = self.lo.cos();
    let cb = self.hi.cos();
    let mut lo = round::lib_down(ca.min(cb)).max(-1.0);
    let mut hi = round::lib_up(ca.max(cb)).min(1.0);
    let (m0, m1) = quarter_turns(self.lo, self.hi);
    let mut m = m0;
    while m <= m1 {
      match quadrant(m) {
        0 => hi = 1.0,
        2 => lo = -1.0,
        _ => (),
      }
      m += 1.0;
    }
    Flint::from_bounds(lo, hi)
  }

  /// Tangent. The whole line when a pole lies inside the input or the input spans a period:
  /// the two unbounded rays around a pole cannot be represented more tightly by one convex
  /// interval.
  pub fn tan(self) -> Flint {
    if !self.is_valid() { return self; }
    let whole = Flint::from_bounds(f64::NEG_INFINITY, f64::INFINITY);
    if self.lo.abs() > TRIG_ARG_MAX || self.hi.abs() > TRIG_ARG_MAX
      || self.hi - self.lo >= PI_LO {
      return whole;
    }
    let (m0, m1) = quarter_turns(self.lo, self.hi);
    let mut m = m0;
    while m <= m1 {
      if quadrant(m) % 2 == 1 { return whole; }
      m += 1.0;
    }
    let ta = self.lo.tan();
    let tb = self.hi.tan();
    if ta > tb { return whole; }
    Flint::from_bounds(round::lib_down(ta), round::lib_up(tb))
  }

  /// Arc sine. Entirely outside `[-1, 1]` is a domain error; a bound sticking out is
  /// clipped to the corresponding `+-pi/2`.
  pub fn asin(self) -> Flint {
    if !self.is_valid() { return self; }
    if self.hi < -1.0 || self.lo > 1.0 { return Flint::undefined(); }
    let lo = if self.lo < -1.0 {
      -FRAC_PI_2_HI
    } else {
      round::lib_down(self.lo.asin()).max(-FRAC_PI_2_HI)
    };
    let hi = if self.hi > 1.0 {
      FRAC_PI_2_HI
    } else {
      round::lib_up(self.hi.asin()).min(FRAC_PI_2_HI)
    };
    Flint::from_bounds(lo, hi)
  }

  /// Arc cosine, decreasing; same domain and clipping policy as [`Flint::asin`] with range
  /// `[0, pi]`.
  pub fn acos(self) -> Flint {
    if !self.is_valid() { return self; }
    if self.hi < -1.0 || self.lo > 1.0 { return Flint::undefined(); }
    let hi = if self.lo < -1.0 {
      PI_HI
    } else {
      round::lib_up(self.lo.acos()).min(PI_HI)
    };
    let lo = if self.hi > 1.0 {
      0.0
    } else {
      round::lib_down(self.hi.acos()).max(0.0)
    };
    Flint::from_bounds(lo, hi)
  }

  /// Four-quadrant arc tangent of `self` (the ordinate) and `x` (the abscissa).
  ///
  /// When the box touches the branch cut along the negative x axis, or contains the origin,
  /// the two branches cannot be separated without knowing which side the true value lies on,
  /// so the convex hull `[-pi, pi]` of the whole range is returned.
  pub fn atan2(self, x: Flint) -> Flint {
    if let Some(t) = taint(self, x) { return t; }
    let y = self;
    let whole = Flint::from_bounds(-PI_HI, PI_HI);
    let (a, b) = if y.lo > 0.0 {
      // Upper half plane: decreasing in x.
      if x.lo > 0.0 {
        (y.lo.atan2(x.hi), y.hi.atan2(x.lo))
      } else if x.hi > 0.0 {
        (y.lo.atan2(x.hi), y.lo.atan2(x.lo))
      } else {
        (y.hi.atan2(x.hi), y.lo.atan2(x.lo))
      }
    } else if y.hi > 0.0 {
      if x.lo > 0.0 {
        (y.lo.atan2(x.lo), y.hi.atan2(x.lo))
      } else {
        // The branch point or the branch cut lies inside the box.
        return whole;
      }
    } else {
      // Lower half plane: increasing in x.
      if y.hi == 0.0 && x.lo <= 0.0 {
        // atan2(0, x<0) = pi while nearby negative ordinates answer close to -pi, and
        // atan2(0, 0) = 0 while x = 0 pins every negative ordinate at -pi/2.
        return whole;
      }
      if x.lo > 0.0 {
        (y.lo.atan2(x.lo), y.hi.atan2(x.hi))
      } else if x.hi > 0.0 {
        (y.hi.atan2(x.lo), y.hi.atan2(x.hi))
      } else {
        (y.hi.atan2(x.lo), y.lo.atan2(x.hi))
      }
    };
    Flint::from_bounds(
      round::lib_down(a).max(-PI_HI),
      round::lib_up(b).min(PI_HI))
  }

  /// Hyperbolic cosine: even, minimal at zero, so a zero-straddling interval has lower
  /// bound exactly 1.
  pub fn cosh(self) -> Flint {
    if !self.is_valid() { return self; }
    let a = self.lo.cosh();
    let b = self.hi.cosh();
    let hi = round::lib_up(a.max(b));
    if self.lo > 0.0 || self.hi < 0.0 {
      Flint::from_bounds(round::lib_down(a.min(b)).max(1.0), hi)
    }
    else {
      Flint::from_bounds(1.0, hi)
    }
  }

  /// Inverse hyperbolic cosine, domain `[1, +inf)`; a bound below 1 clips to 0.
  pub fn acosh(self) -> Flint {
    if !self.is_valid() { return self; }
    if self.hi < 1.0 { return Flint::undefined(); }
    let hi = round::lib_up(self.hi.acosh());
    if self.lo < 1.0 {
      Flint::from_bounds(0.0, hi)
    }
    else {
      Flint::from_bounds(round::lib_down(self.lo.acosh()).max(0.0), hi)
    }
  }

  /// Inverse hyperbolic tangent, domain `[-1, 1]`; a bound sticking out clips to the
  /// corresponding infinity.
  pub fn atanh(self) -> Flint {
    if !self.is_valid() { return self; }
    if self.hi < -1.0 || self.lo > 1.0 { return Flint::undefined(); }
    let lo = if self.lo < -1.0 {
      f64::NEG_INFINITY
    } else {
      round::lib_down(self.lo.atanh())
    };
    let hi = if self.hi > 1.0 {
      f64::INFINITY
    } else {
      round::lib_up(self.hi.atanh())
    };
    Flint::from_bounds(lo, hi)
  }
}

/// Endpoints of `|x|` over the interval: `(min |x|, max |x|)`.
fn fold_abs(f: Flint) -> (f64, f64) {
  if f.lo >= 0.0 {
    (f.lo, f.hi)
  }
  else if f.hi <= 0.0 {
    (-f.hi, -f.lo)
  }
  else {
    (0.0, (-f.lo).max(f.hi))
  }
}

fn powf_down(x: f64, e: f64) -> f64 {
  if x == 0.0 { return 0.0; }
  round::lib_down(x.powf(e))
}

fn powf_up(x: f64, e: f64) -> f64 {
  if x == 0.0 { return 0.0; }
  round::lib_up(x.powf(e))
}

/// Range of integers `m` such that `m * pi/2` may fall inside `[lo, hi]`, widened a little
/// so that an extremum hugging a bound is never missed.
fn quarter_turns(lo: f64, hi: f64) -> (f64, f64) {
  const SLACK: f64 = 1.0e-9;
  (((lo - SLACK) / FRAC_PI_2_LO).ceil(), ((hi + SLACK) / FRAC_PI_2_LO).floor())
}

/// `m mod 4` as a non-negative quadrant index.
fn quadrant(m: f64) -> i32 {
  (((m % 4.0) + 4.0) % 4.0) as i32
}
