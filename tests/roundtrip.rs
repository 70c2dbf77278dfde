//! Round-trip and span-coverage properties (spec.md §8).

fn assert_round_trips(source: &str) {
    let doc = xmltree::parse(source);
    assert_eq!(doc.to_string(), source, "round-trip failed for {source:?}");
}

fn assert_spans_partition(source: &str) {
    let doc = xmltree::parse(source);
    let mut expected_start = 0u32;
    for seg in doc.segments() {
        assert_eq!(
            seg.start_index(),
            expected_start,
            "gap/overlap before segment at {source:?}"
        );
        expected_start = seg.after_end_index();
    }
    assert_eq!(expected_start as usize, source.len());
}

const SAMPLES: &[&str] = &[
    "",
    "plain text",
    "<a></a>",
    "<a/>",
    "<a b='c'/>",
    "<a b=\"c\" d='e'></a>",
    "<a><b><c/></b></a>",
    "<!-- a comment -->",
    "<![CDATA[ raw <<< data ]]>",
    "<?xml version=\"1.0\" encoding=\"utf-8\"?>",
    "<?processing instruction?>",
    "<!DOCTYPE html>",
    "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0//EN\" \"http://example.com\">",
    "<!DOCTYPE html [ <!ELEMENT a (#PCDATA)> ]>",
    "<a",
    "<",
    "</a>",
    "<a b=",
    "<a b='unterminated",
    "<!-- unterminated",
    "<![CDATA[ unterminated",
    "text <a>nested</a> more text\n",
    "<a>\r\n  <b/>\r\n</a>",
];

#[test]
fn every_sample_round_trips_verbatim() {
    for source in SAMPLES {
        assert_round_trips(source);
    }
}

#[test]
fn every_sample_has_contiguous_non_overlapping_segment_spans() {
    for source in SAMPLES {
        assert_spans_partition(source);
    }
}

#[test]
fn idempotent_formatting() {
    for source in SAMPLES {
        let doc = xmltree::parse(source);
        let once = doc.format_default();
        let reparsed = xmltree::parse(&once);
        let twice = reparsed.format_default();
        assert_eq!(once, twice, "format() not idempotent for {source:?}");
    }
}

#[test]
fn contains_index_is_true_at_every_offset_the_segment_covers() {
    let doc = xmltree::parse("<a b='c'>text</a>");
    for seg in doc.segments() {
        for i in seg.start_index()..seg.after_end_index() {
            assert!(seg.contains_index(i), "expected containsIndex({i}) to hold");
        }
    }
}
