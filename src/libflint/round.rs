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

//! Directed rounding of the basic floating point operations.
//!
//! Every primitive evaluates its operation rounded toward `-inf` (`*_down`) or toward `+inf`
//! (`*_up`) without touching the global rounding mode: the round-to-nearest result is computed
//! first, then the exact residual of that result is recovered (Knuth's two-sum for addition,
//! the `mul_add` residual for multiplication, division and square root) and the result is
//! nudged one ulp outward only when the residual proves the nearest result lies on the unsafe
//! side. Exactly representable results therefore come back exact, and no thread ever observes
//! a modified rounding-mode register.
//!
//! Overflow saturates conservatively: a lower bound that overflows to `+inf` comes back as
//! `f64::MAX` (any representable value is below the true result), while an upper bound keeps
//! `+inf`. The mirrored rule applies at `-inf`.
//!
//! The residual trick cannot certify exactness once the nearest result is subnormal (the
//! rounding error itself may be too small to represent), so a subnormal result with a zero
//! residual is nudged anyway. The same applies to a product of nonzero operands that
//! underflows all the way to zero: the zero is untrusted and nudged outward.

/// Exact error of floating point addition: `s + e == a + b` whenever `s` is finite.
#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
  let s = a + b;
  let a2 = s - b;
  let b2 = s - a2;
  let e = (a - a2) + (b - b2);
  (s, e)
}

pub fn add_down(a: f64, b: f64) -> f64 {
  let (s, e) = two_sum(a, b);
  if s.is_infinite() {
    return if s > 0.0 { f64::MAX } else { s };
  }
  if e < 0.0 { s.next_down() } else { s }
}

pub fn add_up(a: f64, b: f64) -> f64 {
  let (s, e) = two_sum(a, b);
  if s.is_infinite() {
    return if s < 0.0 { f64::MIN } else { s };
  }
  if e > 0.0 { s.next_up() } else { s }
}

pub fn sub_down(a: f64, b: f64) -> f64 {
  add_down(a, -b)
}

pub fn sub_up(a: f64, b: f64) -> f64 {
  add_up(a, -b)
}

pub fn mul_down(a: f64, b: f64) -> f64 {
  if a == 0.0 || b == 0.0 { return 0.0; }
  let p = a * b;
  if p.is_infinite() {
    return if p > 0.0 { f64::MAX } else { p };
  }
  let e = a.mul_add(b, -p);
  if e < 0.0 || (e == 0.0 && (p.is_subnormal() || p == 0.0)) { p.next_down() } else { p }
}

pub fn mul_up(a: f64, b: f64) -> f64 {
  if a == 0.0 || b == 0.0 { return 0.0; }
  let p = a * b;
  if p.is_infinite() {
    return if p < 0.0 { f64::MIN } else { p };
  }
  let e = a.mul_add(b, -p);
  if e > 0.0 || (e == 0.0 && (p.is_subnormal() || p == 0.0)) { p.next_up() } else { p }
}

pub fn div_down(a: f64, b: f64) -> f64 {
  if a == 0.0 { return 0.0; }
  if b.is_infinite() {
    // The true quotient is a nonzero value of vanishing magnitude.
    return if (a > 0.0) == (b > 0.0) { 0.0 } else { 0f64.next_down() };
  }
  let q = a / b;
  if q.is_infinite() {
    return if q > 0.0 { f64::MAX } else { q };
  }
  // r = q * b - a, exact outside the subnormal range; q overestimates iff r and b share a sign.
  let r = q.mul_add(b, -a);
  let high = if b > 0.0 { r > 0.0 } else { r < 0.0 };
  if high || (r == 0.0 && q.is_subnormal()) { q.next_down() } else { q }
}

pub fn div_up(a: f64, b: f64) -> f64 {
  if a == 0.0 { return 0.0; }
  if b.is_infinite() {
    return if (a > 0.0) == (b > 0.0) { 0f64.next_up() } else { 0.0 };
  }
  let q = a / b;
  if q.is_infinite() {
    return if q < 0.0 { f64::MIN } else { q };
  }
  let r = q.mul_add(b, -a);
  let low = if b > 0.0 { r < 0.0 } else { r > 0.0 };
  if low || (r == 0.0 && q.is_subnormal()) { q.next_up() } else { q }
}

/// `sqrt` never underflows to a subnormal (the root of the smallest subnormal is `2^-537`),
/// so the residual is always exact here.
pub fn sqrt_down(a: f64) -> f64 {
  if a == 0.0 { return 0.0; }
  let s = a.sqrt();
  if s.is_infinite() { return s; }
  let r = s.mul_add(s, -a);
  if r > 0.0 { s.next_down() } else { s }
}

pub fn sqrt_up(a: f64) -> f64 {
  if a == 0.0 { return 0.0; }
  let s = a.sqrt();
  if s.is_infinite() { return s; }
  let r = s.mul_add(s, -a);
  if r < 0.0 { s.next_up() } else { s }
}

/// Downward correction for a libm-evaluated function value.
///
/// The platform math library only promises faithful rounding (error below one ulp), so two
/// ulps outward cover both the libm error and the final rounding of the result.
pub fn lib_down(x: f64) -> f64 {
  x.next_down().next_down()
}

/// Upward correction for a libm-evaluated function value. See [`lib_down`].
pub fn lib_up(x: f64) -> f64 {
  x.next_up().next_up()
}
