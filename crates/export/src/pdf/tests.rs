use super::*;
use flate2::read::ZlibDecoder;
use image::{Rgba, RgbaImage};
use std::io::Read;

fn placement() -> PagePlacement {
    PagePlacement::full_page(MediaBox::from_dimensions(6.0, 3.0))
}

fn uncompressed() -> PdfOptions {
    PdfOptions {
        compress: false,
        ..Default::default()
    }
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

fn as_text(pdf: &[u8]) -> String {
    String::from_utf8_lossy(pdf).into_owned()
}

/// Byte offsets of every in-use object, read from the xref table
fn xref_offsets(pdf: &[u8]) -> Vec<(u32, usize)> {
    let marker = b"startxref\n";
    let at = pdf.windows(marker.len()).rposition(|w| w == marker).unwrap() + marker.len();
    let tail = std::str::from_utf8(&pdf[at..]).unwrap();
    let start: usize = tail.lines().next().unwrap().parse().unwrap();

    // Everything from the xref table on is plain ASCII
    let table = std::str::from_utf8(&pdf[start..]).unwrap();
    let mut lines = table.lines();
    assert_eq!(lines.next(), Some("xref"));
    let count: u32 = lines.next().unwrap().split(' ').nth(1).unwrap().parse().unwrap();

    lines
        .take(count as usize)
        .enumerate()
        .filter(|(_, line)| line.ends_with("n "))
        .map(|(num, line)| (num as u32, line[..10].parse().unwrap()))
        .collect()
}

fn stream_data(pdf: &[u8], obj_num: u32) -> Vec<u8> {
    let offset = xref_offsets(pdf)
        .into_iter()
        .find(|(n, _)| *n == obj_num)
        .map(|(_, o)| o)
        .unwrap();

    let length_at = find(pdf, b"/Length ", offset).unwrap() + b"/Length ".len();
    let digits: String = pdf[length_at..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .map(|&b| b as char)
        .collect();
    let length: usize = digits.parse().unwrap();

    let data_at = find(pdf, b"stream\n", length_at).unwrap() + b"stream\n".len();
    pdf[data_at..data_at + length].to_vec()
}

#[test]
fn test_file_structure_and_xref() {
    let bitmap = RgbaImage::from_pixel(4, 2, Rgba([255, 255, 255, 255]));
    let pdf = write_image_pdf(&bitmap, &placement(), &PdfOptions::default(), None).unwrap();

    assert!(pdf.starts_with(b"%PDF-1.4\n"));
    assert!(pdf.ends_with(b"%%EOF\n"));

    let offsets = xref_offsets(&pdf);
    assert_eq!(offsets.len(), 6);
    for (num, offset) in offsets {
        let header = format!("{} 0 obj\n", num);
        assert!(pdf[offset..].starts_with(header.as_bytes()), "bad offset for object {}", num);
    }
}

#[test]
fn test_single_page_with_image() {
    let bitmap = RgbaImage::from_pixel(4, 2, Rgba([1, 2, 3, 255]));
    let pdf = as_text(&write_image_pdf(&bitmap, &placement(), &uncompressed(), None).unwrap());

    assert!(pdf.contains("/Count 1"));
    assert!(pdf.contains("/Type /Page "));
    assert!(pdf.contains("/MediaBox [0.0 0.0 6.0 3.0]"));
    assert!(pdf.contains("/XObject << /Im0 6 0 R >>"));
    assert!(!pdf.contains("/FlateDecode"));
}

#[test]
fn test_content_stream_paints_placement() {
    let bitmap = RgbaImage::from_pixel(4, 2, Rgba([1, 2, 3, 255]));
    let placement = PagePlacement {
        media_box: MediaBox::a4(),
        x: 0.0,
        y: 545.5,
        width: 595.0,
        height: 296.5,
    };
    let pdf = write_image_pdf(&bitmap, &placement, &uncompressed(), None).unwrap();

    assert_eq!(
        stream_data(&pdf, 5),
        b"q\n595 0 0 296.5 0 545.5 cm\n/Im0 Do\nQ\n".to_vec()
    );
}

#[test]
fn test_image_samples_are_lossless() {
    let mut bitmap = RgbaImage::from_pixel(2, 2, Rgba([9, 8, 7, 255]));
    bitmap.put_pixel(1, 1, Rgba([200, 100, 50, 255]));
    let expected = vec![9, 8, 7, 9, 8, 7, 9, 8, 7, 200, 100, 50];

    let raw = write_image_pdf(&bitmap, &placement(), &uncompressed(), None).unwrap();
    assert_eq!(stream_data(&raw, 6), expected);

    let packed = write_image_pdf(&bitmap, &placement(), &PdfOptions::default(), None).unwrap();
    assert!(as_text(&packed).contains("/Filter /FlateDecode"));
    let mut inflated = Vec::new();
    ZlibDecoder::new(stream_data(&packed, 6).as_slice())
        .read_to_end(&mut inflated)
        .unwrap();
    assert_eq!(inflated, expected);
}

#[test]
fn test_soft_mask_only_with_transparency() {
    let opaque = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
    let pdf = as_text(&write_image_pdf(&opaque, &placement(), &uncompressed(), None).unwrap());
    assert!(!pdf.contains("/SMask"));

    let mut translucent = opaque.clone();
    translucent.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
    let pdf = write_image_pdf(&translucent, &placement(), &uncompressed(), None).unwrap();
    assert!(as_text(&pdf).contains("/SMask 7 0 R"));
    assert_eq!(stream_data(&pdf, 7), vec![0, 255, 255, 255]);
}

#[test]
fn test_info_title() {
    let bitmap = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));

    let pdf = as_text(&write_image_pdf(&bitmap, &placement(), &uncompressed(), Some("Amelia Chen")).unwrap());
    assert!(pdf.contains("/Title (Amelia Chen)"));
    assert!(pdf.contains("/CreationDate (D:"));

    let options = PdfOptions {
        title: Some("Resume".into()),
        ..uncompressed()
    };
    let pdf = as_text(&write_image_pdf(&bitmap, &placement(), &options, Some("Amelia Chen")).unwrap());
    assert!(pdf.contains("/Title (Resume)"));
}

#[test]
fn test_empty_bitmap_is_rejected() {
    let err = write_image_pdf(&RgbaImage::new(0, 0), &placement(), &PdfOptions::default(), None).unwrap_err();
    assert!(matches!(err, PdfError::InvalidDocument(_)));
}

#[test]
fn test_options_deserialize_with_defaults() {
    let options: PdfOptions = serde_json::from_str(r#"{"title":"CV"}"#).unwrap();
    assert!(options.compress);
    assert_eq!(options.title.as_deref(), Some("CV"));
}
