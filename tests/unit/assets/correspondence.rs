use super::*;

const TWO_PAIRS: &str = "2\n\
    10 20 30 40 11 21 31 41\n\
    0 0 5.5 0 1 1 6.5 1\n";

#[test]
fn parses_text_layout() {
    let corr = parse_text(TWO_PAIRS).unwrap();
    assert_eq!(corr.len(), 2);
    assert_eq!(
        corr.pairs[0].source,
        Segment::from_coords(10.0, 20.0, 30.0, 40.0)
    );
    assert_eq!(
        corr.pairs[1].target,
        Segment::from_coords(1.0, 1.0, 6.5, 1.0)
    );

    let (src, dst) = corr.split();
    assert_eq!(src.len(), dst.len());
    assert_eq!(dst[0], Segment::from_coords(11.0, 21.0, 31.0, 41.0));
}

#[test]
fn ignores_trailing_lines_and_extra_tokens() {
    let text = "1 pairs follow\n1 2 3 4 5 6 7 8 extra\nnot a pair\n";
    let corr = parse_text(text).unwrap();
    assert_eq!(corr.len(), 1);
    assert_eq!(corr.pairs[0].target.end.y, 8.0);
}

#[test]
fn skips_blank_lines_between_pairs() {
    let text = "2\n\n1 2 3 4 5 6 7 8\n   \n8 7 6 5 4 3 2 1\n";
    assert_eq!(parse_text(text).unwrap().len(), 2);
}

#[test]
fn zero_pairs_is_valid() {
    assert!(parse_text("0\n").unwrap().is_empty());
}

#[test]
fn malformed_inputs_are_parse_errors() {
    for text in [
        "",
        "two\n1 2 3 4 5 6 7 8\n",
        "-1\n",
        "1\n1 2 3 4 5 6 7\n",
        "1\n1 2 3 x 5 6 7 8\n",
        "3\n1 2 3 4 5 6 7 8\n",
    ] {
        assert!(
            matches!(parse_text(text), Err(MorphError::Parse(_))),
            "accepted {text:?}"
        );
    }
}

#[test]
fn error_names_the_offending_line() {
    let err = parse_text("2\n1 2 3 4 5 6 7 8\n1 2\n").unwrap_err();
    assert!(err.to_string().contains("line 3"), "{err}");
}

#[test]
fn text_output_is_one_line_per_pair() {
    let corr = parse_text(TWO_PAIRS).unwrap();
    assert_eq!(
        to_text(&corr),
        "2\n10 20 30 40 11 21 31 41\n0 0 5.5 0 1 1 6.5 1\n"
    );
}

#[test]
fn text_output_parses_back() {
    let corr = parse_text(TWO_PAIRS).unwrap();
    let text = to_text(&corr);
    assert!(text.starts_with("2\n"));
    assert_eq!(parse_text(&text).unwrap(), corr);
}

#[test]
fn json_layout_matches_text_layout() {
    let json = r#"{
        "pairs": [
            {
                "source": {"start": {"x": 10, "y": 20}, "end": {"x": 30, "y": 40}},
                "target": {"start": {"x": 11, "y": 21}, "end": {"x": 31, "y": 41}}
            },
            {
                "source": {"start": {"x": 0, "y": 0}, "end": {"x": 5.5, "y": 0}},
                "target": {"start": {"x": 1, "y": 1}, "end": {"x": 6.5, "y": 1}}
            }
        ]
    }"#;
    assert_eq!(parse_json(json).unwrap(), parse_text(TWO_PAIRS).unwrap());
    assert!(matches!(
        parse_json("{\"pairs\": 3}"),
        Err(MorphError::Parse(_))
    ));
}

#[test]
fn files_dispatch_on_extension() {
    let dir = std::env::temp_dir().join("metamorph_correspondence_tests");
    std::fs::create_dir_all(&dir).unwrap();
    let corr = parse_text(TWO_PAIRS).unwrap();

    let json_path = dir.join("lines.json");
    write_correspondences(&corr, &json_path).unwrap();
    assert!(
        std::fs::read_to_string(&json_path)
            .unwrap()
            .trim_start()
            .starts_with('{')
    );
    assert_eq!(load_correspondences(&json_path).unwrap(), corr);

    let txt_path = dir.join("lines.txt");
    write_correspondences(&corr, &txt_path).unwrap();
    assert_eq!(load_correspondences(&txt_path).unwrap(), corr);
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = load_correspondences(Path::new("no/such/lines.txt")).unwrap_err();
    assert!(format!("{err:#}").contains("lines.txt"));
}
