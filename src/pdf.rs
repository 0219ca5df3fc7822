// Minimal PDF wrapper
//------------------------------------------------------------------------------
//
// Deliberately not a general-purpose PDF writer: one fixed-size page, one
// embedded vector stream, nothing else. Kept behind the `export` format
// interface so a real PDF library can replace it without touching callers.

/// Wraps a vector document in a single-page PDF sized `width` x `height`
/// points, with the SVG payload embedded as the page's sole stream.
pub fn wrap_svg(svg: &str, width: u32, height: u32) -> Vec<u8> {
    let payload = svg.as_bytes();
    let objects: [String; 4] = [
        "<< /Type /Catalog /Pages 2 0 R >>".into(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".into(),
        format!("<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {width} {height}] /Contents 4 0 R >>"),
        format!("<< /Length {} /Subtype /SVG >>", payload.len()),
    ];

    let mut out: Vec<u8> = Vec::with_capacity(payload.len() + 512);
    out.extend_from_slice(b"%PDF-1.4\n");

    let mut offsets = [0usize; 4];
    for (i, body) in objects.iter().enumerate() {
        offsets[i] = out.len();
        out.extend_from_slice(format!("{} 0 obj\n{}\n", i + 1, body).as_bytes());
        if i == 3 {
            out.extend_from_slice(b"stream\n");
            out.extend_from_slice(payload);
            out.extend_from_slice(b"\nendstream\n");
        }
        out.extend_from_slice(b"endobj\n");
    }

    let xref_at = out.len();
    out.extend_from_slice(b"xref\n0 5\n0000000000 65535 f \n");
    for off in offsets {
        out.extend_from_slice(format!("{off:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!("trailer\n<< /Size 5 /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n").as_bytes(),
    );
    out
}

#[cfg(test)]
mod pdf_tests {
    use super::*;

    #[test]
    fn wraps_one_page_one_stream() {
        let bytes = wrap_svg("<svg xmlns=\"a\"></svg>", 400, 400);
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.ends_with("%%EOF\n"));
        assert_eq!(text.matches("/Type /Page ").count(), 1);
        assert_eq!(text.matches("stream\n").count(), 2); // stream + endstream
        assert!(text.contains("/MediaBox [0 0 400 400]"));
        assert!(text.contains("<svg xmlns=\"a\"></svg>"));
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let bytes = wrap_svg("<svg/>", 100, 100);
        let text = String::from_utf8_lossy(&bytes).to_string();
        let xref = text.find("xref\n0 5\n").unwrap();
        for (i, line) in text[xref..].lines().skip(3).take(4).enumerate() {
            let off: usize = line.split_whitespace().next().unwrap().parse().unwrap();
            assert!(text[off..].starts_with(&format!("{} 0 obj", i + 1)));
        }
        let startxref: usize = text
            .lines()
            .skip_while(|l| *l != "startxref")
            .nth(1)
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(startxref, xref);
    }
}
