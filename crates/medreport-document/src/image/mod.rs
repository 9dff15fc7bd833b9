// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — load, resize and circular-mask hospital logos.

pub mod mask;
pub mod processor;

pub use processor::ImageProcessor;
