// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the medreport-document crate: circular masking of
// a logo-sized image and rendering of the sample report.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};

use medreport_core::{LayoutVariant, ReportRequest};
use medreport_document::{ReportComposer, mask_image};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Benchmark the 3x supersampled circular mask on a 256x256 logo.
fn bench_circular_mask(c: &mut Criterion) {
    let logo = DynamicImage::ImageRgb8(RgbImage::from_pixel(256, 256, Rgb([20, 90, 160])));

    c.bench_function("circular_mask (256x256)", |b| {
        b.iter(|| black_box(mask_image(black_box(&logo))));
    });
}

/// Benchmark rendering the sample report without a logo.
fn bench_render_report(c: &mut Criterion) {
    let request = ReportRequest {
        doctor_name: "Dr. John Doe".into(),
        patient_name: "Muhammad AbuBakar".into(),
        patient_id: "12345-6789012-3".into(),
        gender: "Male".into(),
        age: "25".into(),
        diagnosis: "Flu".into(),
        medicines: vec!["Calpol 25mg".into(), "Panadol 2 tablets".into()],
        instructions: "Stay hydrated and rest.".into(),
        hospital_name: "City Hospital".into(),
        logo_path: None,
    };
    let composer = match ReportComposer::with_variant(LayoutVariant::Stacked) {
        Ok(composer) => composer,
        Err(err) => panic!("default config rejected: {err}"),
    };

    c.bench_function("render_report (stacked)", |b| {
        b.iter(|| black_box(composer.render(black_box(&request), None)));
    });
}

criterion_group!(benches, bench_circular_mask, bench_render_report);
criterion_main!(benches);
