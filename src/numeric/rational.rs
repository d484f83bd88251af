// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::cmp::Ordering;
use std::ops::{Add, Mul, Sub};

use rug::Rational;

/// Exact rational used when a floating-point predicate cannot decide a sign.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct ExactRational(pub Rational);

impl ExactRational {
    /// Exact image of a finite `f64`, `None` for NaN or infinities.
    pub fn from_f64(v: f64) -> Option<Self> {
        Rational::from_f64(v).map(ExactRational)
    }

    #[inline]
    pub fn sign(&self) -> Ordering {
        self.0.cmp0()
    }

    pub fn square(&self) -> Self {
        self * self
    }
}

impl<'a, 'b> Add<&'b ExactRational> for &'a ExactRational {
    type Output = ExactRational;

    fn add(self, rhs: &'b ExactRational) -> ExactRational {
        let mut result = self.0.clone();
        result += &rhs.0;
        ExactRational(result)
    }
}

impl<'a, 'b> Sub<&'b ExactRational> for &'a ExactRational {
    type Output = ExactRational;

    fn sub(self, rhs: &'b ExactRational) -> ExactRational {
        let mut result = self.0.clone();
        result -= &rhs.0;
        ExactRational(result)
    }
}

impl<'a, 'b> Mul<&'b ExactRational> for &'a ExactRational {
    type Output = ExactRational;

    fn mul(self, rhs: &'b ExactRational) -> ExactRational {
        let mut result = self.0.clone();
        result *= &rhs.0;
        ExactRational(result)
    }
}

impl From<i32> for ExactRational {
    fn from(v: i32) -> Self {
        ExactRational(Rational::from(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_is_exact() {
        let big = ExactRational::from_f64(1e17).unwrap();
        let one = ExactRational::from(1);
        let sum = &big + &one;
        let back = &sum - &big;
        assert_eq!(back, one);
        assert_eq!((&back - &one).sign(), Ordering::Equal);
    }

    #[test]
    fn non_finite_has_no_exact_value() {
        assert!(ExactRational::from_f64(f64::NAN).is_none());
        assert!(ExactRational::from_f64(f64::INFINITY).is_none());
    }
}
