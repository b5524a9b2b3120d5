//! Property tests for range clipping.

use proptest::prelude::*;
use srcline_codec::{ClippedOffsets, OffsetError, Range, clip};

proptest! {
    #[test]
    fn proptest_clip_is_pure(
        start_line in 1u32..50,
        span in 0u32..5,
        start_offset in 0u32..200,
        end_offset in 0u32..200,
        delta in 0u32..5,
        length in 0u32..200,
    ) {
        let range = Range::new(start_line, start_line + span, start_offset, end_offset).unwrap();
        let line = start_line + delta.min(span);
        prop_assert_eq!(clip(&range, line, length), clip(&range, line, length));
    }

    #[test]
    fn proptest_single_line_range_keeps_its_offsets(
        line in 1u32..1000,
        start in 0u32..500,
        width in 0u32..500,
        slack in 0u32..100,
    ) {
        let end = start + width;
        let range = Range::new(line, line, start, end).unwrap();
        prop_assert_eq!(
            clip(&range, line, end + slack),
            Ok(ClippedOffsets { start, end })
        );
    }

    #[test]
    fn proptest_multi_line_range_covers_whole_inner_lines(
        start_line in 1u32..100,
        lengths in prop::collection::vec(0u32..120, 3..8),
        start_pick in any::<prop::sample::Index>(),
        end_pick in any::<prop::sample::Index>(),
    ) {
        let last = lengths.len() - 1;
        let start_offset = start_pick.index(lengths[0] as usize + 1) as u32;
        let end_offset = end_pick.index(lengths[last] as usize + 1) as u32;
        let range = Range::new(
            start_line,
            start_line + last as u32,
            start_offset,
            end_offset,
        )
        .unwrap();

        for (idx, &length) in lengths.iter().enumerate() {
            let clipped = clip(&range, start_line + idx as u32, length).unwrap();
            let expected = if idx == 0 {
                ClippedOffsets { start: start_offset, end: length }
            } else if idx == last {
                ClippedOffsets { start: 0, end: end_offset }
            } else {
                ClippedOffsets { start: 0, end: length }
            };
            prop_assert_eq!(clipped, expected);
        }
    }

    #[test]
    fn proptest_end_before_start_on_one_line_fails(
        line in 1u32..1000,
        end in 0u32..100,
        gap in 1u32..100,
    ) {
        let start = end + gap;
        let range = Range::new(line, line, start, end).unwrap();
        prop_assert_eq!(
            clip(&range, line, start + 10),
            Err(OffsetError::EndBeforeStart { start, end, line })
        );
    }
}

#[test]
fn test_clip_error_messages() {
    let range = Range::new(2, 2, 4, 12).unwrap();
    assert_eq!(
        clip(&range, 2, 10).unwrap_err().to_string(),
        "End offset 12 is defined outside the length (10) of the line 2"
    );

    let range = Range::new(1, 3, 12, 1).unwrap();
    assert_eq!(
        clip(&range, 1, 10).unwrap_err().to_string(),
        "Start offset 12 is defined outside the length (10) of the line 1"
    );

    let range = Range::new(5, 5, 3, 1).unwrap();
    assert_eq!(
        clip(&range, 5, 10).unwrap_err().to_string(),
        "End offset 1 cannot be defined before start offset 3 on line 5"
    );
}
