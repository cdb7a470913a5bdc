use goloclib::{classify, gather_stats, Location, Results, ScanState};
use proptest::prelude::*;

fn any_state() -> impl Strategy<Value = ScanState> {
    (any::<bool>(), any::<bool>()).prop_map(|(in_block_comment, in_multiline_string)| ScanState {
        in_block_comment,
        in_multiline_string,
    })
}

fn any_results() -> impl Strategy<Value = Results> {
    (
        prop::array::uniform7(0u64..1_000_000),
        0u64..64,
        "[a-z]{1,8}\\.go",
        0usize..10_000,
    )
        .prop_map(|(n, max_depth, file, line)| Results {
            files: n[0],
            code: n[1],
            error_checks: n[2],
            comments: n[3],
            blanks: n[4],
            total: n[5],
            inline_comments: n[6],
            max_depth,
            max_depth_location: Location::new(file, line),
        })
}

/// The additive part of a Results, for comparisons that ignore the tie-break.
fn sums(r: &Results) -> [u64; 7] {
    [
        r.files,
        r.code,
        r.error_checks,
        r.comments,
        r.blanks,
        r.total,
        r.inline_comments,
    ]
}

/// Lines built from Go-ish tokens, so braces, quotes and comment markers
/// show up often.
fn go_line() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("{"),
            Just("}"),
            Just("\""),
            Just("'"),
            Just("`"),
            Just("\\"),
            Just("//"),
            Just("/*"),
            Just("*/"),
            Just("if err != nil"),
            Just(" "),
            Just("\t"),
            Just("x"),
            Just("return"),
        ],
        0..12,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn whitespace_lines_are_blank(ws in "[ \t\r\n]{0,16}", state in any_state()) {
        let class = classify(&ws, state);
        prop_assert!(class.is_whitespace);
        prop_assert_eq!(class.braces_delta, 0);
    }

    #[test]
    fn line_comments_are_comment_only(
        indent in "[ \t]{0,4}",
        body in "[^\n]{0,40}",
        state in any_state(),
    ) {
        let line = format!("{}//{}", indent, body);
        let class = classify(&line, state);
        prop_assert!(class.is_only_comment);
        prop_assert!(!class.is_inline_comment);
    }

    #[test]
    fn classification_never_violates_invariants(line in go_line(), state in any_state()) {
        prop_assert!(classify(&line, state).check().is_ok());
    }

    #[test]
    fn scanning_accounts_for_every_line(lines in prop::collection::vec(go_line(), 0..30)) {
        let source: String = lines.iter().map(|l| format!("{}\n", l)).collect();
        let stats = gather_stats(&source).unwrap();

        prop_assert_eq!(stats.total, lines.len() as u64);
        prop_assert!(stats.blanks + stats.comments <= stats.total);
        prop_assert!(stats.code + stats.error_checks + stats.comments + stats.blanks >= stats.total);
        prop_assert!(stats.max_depth_location.line as u64 <= stats.total);
    }

    #[test]
    fn merge_is_associative(a in any_results(), b in any_results(), c in any_results()) {
        let left = a.clone().merge(b.clone()).merge(c.clone());
        let right = a.merge(b.merge(c));
        prop_assert_eq!(sums(&left), sums(&right));
        prop_assert_eq!(left.max_depth, right.max_depth);
    }

    #[test]
    fn merge_is_commutative(a in any_results(), b in any_results()) {
        let ab = a.clone().merge(b.clone());
        let ba = b.merge(a);
        prop_assert_eq!(sums(&ab), sums(&ba));
        prop_assert_eq!(ab.max_depth, ba.max_depth);
    }

    #[test]
    fn merge_keeps_location_of_deepest(a in any_results(), b in any_results()) {
        let merged = a.clone().merge(b.clone());
        let expected = if a.max_depth > b.max_depth { a } else { b };
        prop_assert_eq!(merged.max_depth, expected.max_depth);
        prop_assert_eq!(merged.max_depth_location, expected.max_depth_location);
    }
}
