/*!
 * Tests for caption stream parsing
 */

use signstream::caption_processor::CaptionDocument;

/// Test parsing a well-formed WebVTT document
#[test]
fn test_parse_withValidWebVtt_shouldProduceOrderedRecords() {
    let content = "WEBVTT\n\n1\n00:00:01.000 --> 00:00:04.000\nHello world\n\n2\n00:00:05.000 --> 00:00:09.000\nHow are you\n";

    let document = CaptionDocument::parse(content);

    assert_eq!(document.records.len(), 2);
    assert!(document.rejected.is_empty());

    assert_eq!(document.records[0].interval.start, 1.0);
    assert_eq!(document.records[0].interval.end, 4.0);
    assert_eq!(document.records[0].text, "Hello world");

    assert_eq!(document.records[1].interval.start, 5.0);
    assert_eq!(document.records[1].interval.end, 9.0);
    assert_eq!(document.records[1].text, "How are you");
}

/// Test that multi-line cue text is joined with single spaces
#[test]
fn test_parse_withMultiLineCueText_shouldJoinWithSingleSpaces() {
    let content = "WEBVTT\n\n00:00:01.000 --> 00:00:04.000\nHello\nworld\nagain\n";

    let document = CaptionDocument::parse(content);

    assert_eq!(document.records.len(), 1);
    assert_eq!(document.records[0].text, "Hello world again");
}

/// Test the bracketed console layout where text follows the closing
/// bracket with no separating whitespace
#[test]
fn test_parse_withBracketedTiming_shouldSplitTimingAndText() {
    let content = "[00:01.000 --> 00:04.000]Hello world\n";

    let document = CaptionDocument::parse(content);

    assert_eq!(document.records.len(), 1);
    assert_eq!(document.records[0].interval.start, 1.0);
    assert_eq!(document.records[0].interval.end, 4.0);
    assert_eq!(document.records[0].text, "Hello world");
}

/// Test same-line free text after an unbracketed timing pair
#[test]
fn test_parse_withInlineText_shouldSeedAccumulatedText() {
    let content = "00:00:01.000 --> 00:00:04.000 Hello world\nagain\n";

    let document = CaptionDocument::parse(content);

    assert_eq!(document.records.len(), 1);
    assert_eq!(document.records[0].text, "Hello world again");
}

/// Test that an unparsable timing line is rejected and parsing resumes
#[test]
fn test_parse_withBadTimestamp_shouldRejectCueAndResume() {
    let content = "WEBVTT\n\n1\n00:00:00.000 --> 00:00:02.000\nHello world\n\n2\nbad-timestamp --> 00:00:04.000\nFoo bar\n\n3\n00:00:05.000 --> 00:00:06.000\nGood\n";

    let document = CaptionDocument::parse(content);

    assert_eq!(document.records.len(), 2);
    assert_eq!(document.rejected.len(), 1);
    assert_eq!(
        document.rejected[0].raw_line,
        "bad-timestamp --> 00:00:04.000"
    );
    assert_eq!(document.records[1].text, "Good");
}

/// Test that a line with too many timing separators is rejected as malformed
#[test]
fn test_parse_withExtraSeparators_shouldRejectAsMalformed() {
    let content = "00:00:01.000 --> 00:00:02.000 --> 00:00:03.000\ntext\n";

    let document = CaptionDocument::parse(content);

    assert!(document.records.is_empty());
    assert_eq!(document.rejected.len(), 1);
}

/// Test that a cue with valid timing but no text still yields a record
#[test]
fn test_parse_withEmptyCueBody_shouldStillEmitRecord() {
    let content = "00:00:01.000 --> 00:00:02.000\n\n00:00:03.000 --> 00:00:04.000\nHello\n";

    let document = CaptionDocument::parse(content);

    assert_eq!(document.records.len(), 2);
    assert_eq!(document.records[0].text, "");
    assert_eq!(document.records[1].text, "Hello");
}

/// Test a new timing line starting before a blank line separates cues
#[test]
fn test_parse_withBackToBackCues_shouldCloseCueOnNextTimingLine() {
    let content = "00:00:01.000 --> 00:00:02.000\nfirst\n00:00:03.000 --> 00:00:04.000\nsecond\n";

    let document = CaptionDocument::parse(content);

    assert_eq!(document.records.len(), 2);
    assert_eq!(document.records[0].text, "first");
    assert_eq!(document.records[1].text, "second");
}

/// Test that an inverted interval passes through rather than being rejected
#[test]
fn test_parse_withStartAfterEnd_shouldPassThrough() {
    let content = "00:00:05.000 --> 00:00:01.000\nHello\n";

    let document = CaptionDocument::parse(content);

    assert_eq!(document.records.len(), 1);
    assert_eq!(document.records[0].interval.start, 5.0);
    assert_eq!(document.records[0].interval.end, 1.0);
    assert!(document.rejected.is_empty());
}

/// Test that records keep source order even when times are unsorted
#[test]
fn test_parse_withUnsortedCueTimes_shouldKeepSourceOrder() {
    let content = "00:00:09.000 --> 00:00:10.000\nlater\n\n00:00:01.000 --> 00:00:02.000\nearlier\n";

    let document = CaptionDocument::parse(content);

    assert_eq!(document.records.len(), 2);
    assert_eq!(document.records[0].text, "later");
    assert_eq!(document.records[1].text, "earlier");
}

/// Test that stray text outside any cue is ignored
#[test]
fn test_parse_withStrayTextAndHeader_shouldSkipNonCueLines() {
    let content = "WEBVTT\nNOTE something\n\n42\n00:00:01.000 --> 00:00:02.000\nHello\n";

    let document = CaptionDocument::parse(content);

    assert_eq!(document.records.len(), 1);
    assert_eq!(document.records[0].text, "Hello");
    assert!(document.rejected.is_empty());
}

/// Test empty input
#[test]
fn test_parse_withEmptyDocument_shouldProduceNothing() {
    let document = CaptionDocument::parse("");
    assert!(document.records.is_empty());
    assert!(document.rejected.is_empty());
}

/// Test that text following a rejected timing line is not attributed to
/// any cue
#[test]
fn test_parse_withTextAfterRejectedCue_shouldNotAttachText() {
    let content = "bad --> alsobad\norphan text\n\n00:00:01.000 --> 00:00:02.000\nHello\n";

    let document = CaptionDocument::parse(content);

    assert_eq!(document.rejected.len(), 1);
    assert_eq!(document.records.len(), 1);
    assert_eq!(document.records[0].text, "Hello");
}
