#[cfg(test)]
mod qr_render_tests {

    use qrbadge::raster::rasterize_svg;
    use qrbadge::*;

    /// A pixel size that is an exact multiple of the symbol's module count,
    /// so both render paths place every module edge on the pixel grid.
    fn aligned_size(payload: &str, margin: u32, ppm: u32) -> u32 {
        let matrix = ModuleMatrix::encode(payload).unwrap();
        (matrix.width() as u32 + 2 * margin) * ppm
    }

    #[test]
    fn fast_and_vector_paths_agree_on_plain_symbols() {
        let payload = "https://example.com";
        let opts = QrOptions {
            pixel_size: aligned_size(payload, 2, 12),
            ..QrOptions::new(payload)
        };
        assert!(!opts.needs_vector_path());

        let fast = render_raster(&opts, None).unwrap();
        let svg = render_vector(&opts, None).unwrap();
        let slow = rasterize_svg(&svg, opts.pixel_size, opts.pixel_size).unwrap();

        assert_eq!(fast.dimensions(), slow.dimensions());
        for (fast_px, slow_px) in fast.pixels().zip(slow.pixels()) {
            assert_eq!(fast_px, slow_px);
        }
    }

    #[test]
    fn styled_options_switch_to_the_vector_path() {
        let circles = QrOptions {
            module_shape: ModuleShape::Circle,
            ..QrOptions::new("https://example.com")
        };
        assert!(circles.needs_vector_path());
        let img = render_raster(&circles, None).unwrap();
        assert_eq!(img.dimensions(), (circles.pixel_size, circles.pixel_size));
    }

    #[test]
    fn vector_output_is_well_formed_svg() {
        let opts = QrOptions {
            gradient: Some(Gradient {
                colors: [Rgb::parse("#667eea").unwrap(), Rgb::parse("#764ba2").unwrap()],
                direction: GradientDirection::Diagonal,
            }),
            border: Some(BorderOptions {
                width: 16,
                color: Rgb::parse("#222222").unwrap(),
                radius: 8,
                pattern: BorderPattern::Dashed,
                secondary_color: None,
            }),
            ..QrOptions::new("https://example.com")
        };
        let svg = render_vector(&opts, None).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<svg").count(), 1);
        assert!(svg.contains("linearGradient"));
        // Rasterizing the same document must not error either.
        rasterize_svg(&svg, 512, 512).unwrap();
    }

    #[test]
    fn default_png_has_solid_eyes_and_clean_margin() {
        let opts = QrOptions::new("https://example.com");
        let out = render_in_format(&opts, OutputFormat::Png, None, None).unwrap();
        let img = image::load_from_memory(&out.bytes).unwrap().to_rgba8();
        assert_eq!((img.width(), img.height()), (400, 400));

        let matrix = ModuleMatrix::encode("https://example.com").unwrap();
        let total = matrix.width() as f64 + 4.0;
        let module = 400.0 / total;
        // Center of the top-left eye's 3x3 center block.
        let eye = ((2.0 + 3.5) * module) as u32;
        assert_eq!(img.get_pixel(eye, eye).0, [0, 0, 0, 255]);
        // Middle of the quiet zone.
        let quiet = module as u32;
        assert_eq!(img.get_pixel(quiet, quiet).0, [255, 255, 255, 255]);
    }

    #[test]
    fn formats_report_their_mime_types() {
        let opts = QrOptions::new("https://example.com");
        for (format, mime) in [
            (OutputFormat::Png, "image/png"),
            (OutputFormat::Jpeg, "image/jpeg"),
            (OutputFormat::Svg, "image/svg+xml"),
            (OutputFormat::Pdf, "application/pdf"),
        ] {
            let rendered = render_in_format(&opts, format, None, None).unwrap();
            assert_eq!(rendered.mime_type, mime);
            assert!(!rendered.bytes.is_empty());
        }
    }
}

#[cfg(test)]
mod qr_render_proptests {

    use proptest::prelude::*;

    use qrbadge::*;

    fn payload_strategy() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[a-zA-Z0-9:/._-]{1,64}").unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(12))]

        #[test]
        fn raster_output_matches_requested_size(
            payload in payload_strategy(),
            size in 64u32..800,
        ) {
            let opts = QrOptions { pixel_size: size, ..QrOptions::new(&payload) };
            let img = render_raster(&opts, None).unwrap();
            prop_assert_eq!(img.dimensions(), (size, size));
        }

        #[test]
        fn empty_payloads_never_render(padding in "[ \t]{0,8}") {
            let err = QrOptions::new(&padding).resolve().unwrap_err();
            prop_assert!(matches!(err, Error::EmptyPayload));
        }
    }
}

#[cfg(test)]
mod badge_tests {

    use test_case::test_case;

    use qrbadge::badge::*;

    fn record() -> BadgeRecord {
        BadgeRecord {
            first_name: "Jean".into(),
            last_name: "Dupont".into(),
            company: "Acme".into(),
            website: Some("https://acme.com".into()),
            linkedin: None,
        }
    }

    #[test_case(PaperFormat::Standard, (1004, 650))]
    #[test_case(PaperFormat::A4, (1754, 1240))]
    #[test_case(PaperFormat::A5, (1240, 874))]
    #[test_case(PaperFormat::A6, (874, 620))]
    #[test_case(PaperFormat::Letter, (1650, 1276))]
    fn badge_dimensions_follow_the_paper_format(format: PaperFormat, expected: (u32, u32)) {
        let style = BadgeStyle { format, ..BadgeStyle::default() };
        let img = composite(&record(), &style, None).unwrap();
        assert_eq!((img.width(), img.height()), expected);
    }

    #[test]
    fn layouts_rescale_proportionally_across_formats() {
        let small = BadgeStyle { format: PaperFormat::Standard, ..BadgeStyle::default() }
            .scaled(layout::scale_factor(1004, 650));
        let large = BadgeStyle { format: PaperFormat::A4, ..BadgeStyle::default() }
            .scaled(layout::scale_factor(1754, 1240));
        let ratio = 1754.0 / 1004.0;
        let scaled = (small.qr_size as f64 * ratio).round() as u32;
        assert_eq!(large.qr_size, scaled);
    }

    #[test]
    fn badge_qr_layer_matches_the_encoded_symbol() {
        let style = BadgeStyle::default();
        let img = composite(&record(), &style, None).unwrap();

        let resolved = style.clone().normalized().scaled(1.0);
        let qr = layout::resolve_qr_rect(&resolved, 1004.0, 650.0, 1.0);
        let (qx, qy) = (qr.left as u32, qr.top as u32);

        // The destination URL drives the symbol; each finder center block
        // must land dark at its module-grid position inside the badge.
        let matrix = qrbadge::ModuleMatrix::encode("https://acme.com").unwrap();
        let module = qr.width / (matrix.width() as f64 + 4.0);
        for (ex, ey) in matrix.eye_origins() {
            let cx = qx + ((2.0 + ex as f64 + 3.5) * module) as u32;
            let cy = qy + ((2.0 + ey as f64 + 3.5) * module) as u32;
            assert_eq!(img.get_pixel(cx, cy).0, [0, 0, 0, 255]);
        }
    }

    #[test]
    fn badge_background_color_fills_the_canvas() {
        let style = BadgeStyle {
            background: qrbadge::Rgb(240, 240, 255),
            ..BadgeStyle::default()
        };
        let img = composite(&record(), &style, None).unwrap();
        // A corner pixel sits outside every layout element.
        assert_eq!(img.get_pixel(1, 1).0, [240, 240, 255, 255]);
    }
}

#[cfg(test)]
mod ingest_proptests {

    use std::fmt::Write;

    use proptest::prelude::*;

    use qrbadge::parse_records;

    fn name_strategy() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[A-Za-z]{1,12}").unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Every data row lands in exactly one bucket: accepted or rejected.
        #[test]
        fn rows_partition_into_records_and_errors(
            names in prop::collection::vec((name_strategy(), name_strategy(), any::<bool>()), 1..20),
        ) {
            let mut csv = String::from("firstName,lastName,company,website\n");
            for (first, last, valid) in &names {
                let company = if *valid { "Acme" } else { "" };
                writeln!(csv, "{first},{last},{company},https://acme.com").unwrap();
            }

            let batch = parse_records(csv.as_bytes(), "guests.csv").unwrap();
            let expected_valid = names.iter().filter(|(_, _, valid)| *valid).count();
            prop_assert_eq!(batch.records.len(), expected_valid);
            prop_assert_eq!(batch.records.len() + batch.row_errors.len(), names.len());
            for err in &batch.row_errors {
                prop_assert_eq!(&err.error, "Entreprise manquante");
            }
        }
    }
}
