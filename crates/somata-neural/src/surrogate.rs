// Copyright 2025 Somata Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Surrogate Spiking Functions
//!
//! The firing decision is a Heaviside step on the distance to threshold
//! `d = u - u_threshold`: spike 1.0 where `d >= 0`, else 0.0. Its true
//! derivative is a Dirac delta, which is useless for gradient descent, so
//! the backward pass substitutes a smooth surrogate derivative.
//!
//! The forward step is shared by every implementation; only [`grad`]
//! differs. Somas take the surrogate as a boxed trait object so any model
//! can swap surrogate shape without touching state-machine code.
//!
//! [`grad`]: SurrogateFunction::grad

use crate::types::{Result, SomaError};
use core::fmt;

/// Pluggable spiking strategy: hard step forward, smooth derivative
/// backward.
pub trait SurrogateFunction: fmt::Debug + Send + Sync {
    /// Surrogate name for logging/debugging
    fn surrogate_name(&self) -> &'static str;

    /// Forward value at distance-to-threshold `d`: the Heaviside step.
    #[inline(always)]
    fn spike(&self, d: f32) -> f32 {
        if d >= 0.0 {
            1.0
        } else {
            0.0
        }
    }

    /// Surrogate derivative at distance-to-threshold `d`.
    fn grad(&self, d: f32) -> f32;
}

/// Rectangular-window surrogate: gradient `1/a` where `|d| <= a/2`, else 0.
///
/// With the default window `a = 2` the gradient is 0.5 within one unit of
/// the threshold, matching the reference rectangular kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangular {
    window: f32,
}

impl Rectangular {
    /// Create a rectangular surrogate with window width `a > 0`.
    pub fn new(window: f32) -> Result<Self> {
        if !(window.is_finite() && window > 0.0) {
            return Err(SomaError::InvalidSurrogate {
                reason: "rectangular window must be a positive finite value",
            });
        }
        Ok(Self { window })
    }
}

impl Default for Rectangular {
    fn default() -> Self {
        Self { window: 2.0 }
    }
}

impl SurrogateFunction for Rectangular {
    fn surrogate_name(&self) -> &'static str {
        "Rectangular"
    }

    #[inline(always)]
    fn grad(&self, d: f32) -> f32 {
        if d.abs() <= self.window / 2.0 {
            1.0 / self.window
        } else {
            0.0
        }
    }
}

/// Sigmoid-slope surrogate: gradient `α·σ(αd)·(1-σ(αd))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sigmoid {
    alpha: f32,
}

impl Sigmoid {
    /// Create a sigmoid surrogate with slope `α > 0`.
    pub fn new(alpha: f32) -> Result<Self> {
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(SomaError::InvalidSurrogate {
                reason: "sigmoid slope must be a positive finite value",
            });
        }
        Ok(Self { alpha })
    }
}

impl Default for Sigmoid {
    fn default() -> Self {
        Self { alpha: 4.0 }
    }
}

impl SurrogateFunction for Sigmoid {
    fn surrogate_name(&self) -> &'static str {
        "Sigmoid"
    }

    #[inline(always)]
    fn grad(&self, d: f32) -> f32 {
        let s = 1.0 / (1.0 + (-self.alpha * d).exp());
        self.alpha * s * (1.0 - s)
    }
}

/// Triangular surrogate: gradient falls linearly from `1/w` at the
/// threshold to 0 at `|d| = w`; unit integral like the rectangular window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangular {
    width: f32,
}

impl Triangular {
    /// Create a triangular surrogate with half-base `w > 0`.
    pub fn new(width: f32) -> Result<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(SomaError::InvalidSurrogate {
                reason: "triangular width must be a positive finite value",
            });
        }
        Ok(Self { width })
    }
}

impl Default for Triangular {
    fn default() -> Self {
        Self { width: 1.0 }
    }
}

impl SurrogateFunction for Triangular {
    fn surrogate_name(&self) -> &'static str {
        "Triangular"
    }

    #[inline(always)]
    fn grad(&self, d: f32) -> f32 {
        let slope = 1.0 - d.abs() / self.width;
        if slope > 0.0 {
            slope / self.width
        } else {
            0.0
        }
    }
}
