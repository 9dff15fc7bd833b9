// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — inline text model, page layout, report composition and
// inspection of rendered reports.

pub mod composer;
pub mod layout;
pub mod markup;
pub mod metrics;
pub mod reader;
pub mod winansi;

pub use composer::{ReportComposer, ReportDocument};
pub use reader::ReportReader;
