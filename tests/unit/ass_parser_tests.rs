/*!
 * Tests for the ASS/SSA sub-parser
 */

use subnorm::subtitle_processor::{normalize, SubtitleFormat};
use subnorm::subtitle_processor::ass::split_fields;
use crate::common;

#[test]
fn test_ass_withEventsSection_shouldEmitDialogueOnly() {
    let doc = normalize(common::SAMPLE_ASS, SubtitleFormat::Ass);

    assert_eq!(doc.len(), 2);
    let ids: Vec<usize> = doc.iter().map(|e| e.sequence_id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(doc.iter().all(|e| e.text != "Not shown"));
}

#[test]
fn test_ass_withCentiseconds_shouldProduceCanonicalTimes() {
    let doc = normalize(common::SAMPLE_ASS, SubtitleFormat::Ass);

    assert_eq!(doc.entries()[0].start, "00:00:01,000");
    assert_eq!(doc.entries()[0].end, "00:00:03,500");
    assert_eq!(doc.entries()[1].start, "00:01:02,340");
    assert_eq!(doc.entries()[1].end, "00:01:05,000");
}

#[test]
fn test_ass_withOverrideTags_shouldSanitizeText() {
    let doc = normalize(common::SAMPLE_ASS, SubtitleFormat::Ass);

    assert_eq!(doc.entries()[0].text, "Hello");
    assert_eq!(doc.entries()[1].text, "Positioned text");
}

#[test]
fn test_ass_withLineBreakEscapes_shouldJoinWithSpaces() {
    let content = "[Events]\nFormat: Start, End, Text\nDialogue: 0:00:01.00,0:00:02.00,{\\i1}First\\NSecond\\hline\n";
    let doc = normalize(content, SubtitleFormat::Ass);
    assert_eq!(doc.entries()[0].text, "First Second line");
}

#[test]
fn test_ass_withCommaInPlainText_shouldKeepOnlyDeclaredFields() {
    let content = "[Events]\nFormat: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\nDialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,Hello, world\n";
    let doc = normalize(content, SubtitleFormat::Ass);

    assert_eq!(doc.len(), 1);
    assert_eq!(doc.entries()[0].text, "Hello");
}

#[test]
fn test_ass_withCommaInsideOverride_shouldNotShiftFields() {
    let content = "[Events]\nFormat: Start, End, Text\nDialogue: 0:00:01.00,0:00:02.00,{\\pos(1,2)}Kept\n";
    let doc = normalize(content, SubtitleFormat::Ass);
    assert_eq!(doc.entries()[0].text, "Kept");
}

#[test]
fn test_ass_withEmptyText_shouldDropEntry() {
    let doc = normalize(common::SAMPLE_ASS, SubtitleFormat::Ass);
    assert!(doc.iter().all(|e| e.start != "00:01:06,000"));
}

#[test]
fn test_ass_withLaterSection_shouldStopReadingEvents() {
    let doc = normalize(common::SAMPLE_ASS, SubtitleFormat::Ass);
    assert!(doc.iter().all(|e| e.text != "Font payload"));
}

#[test]
fn test_ass_withoutEventsSection_shouldReturnEmpty() {
    let content = "[Script Info]\nTitle: x\n\n[V4+ Styles]\nFormat: Name, Fontname\nStyle: Default,Arial\n";
    assert!(normalize(content, SubtitleFormat::Ass).is_empty());
}

#[test]
fn test_ass_withDialogueBeforeFormat_shouldSkipIt() {
    let content = "[Events]\nDialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,Early\nFormat: Layer, Start, End, Text\nDialogue: 0,0:00:03.00,0:00:04.00,Late\n";
    let doc = normalize(content, SubtitleFormat::Ass);

    assert_eq!(doc.len(), 1);
    assert_eq!(doc.entries()[0].text, "Late");
}

#[test]
fn test_ass_withReorderedFormat_shouldMapFieldsByName() {
    let content = "[Events]\nFormat: Text, End, Start\nDialogue: Reordered,0:00:09.00,0:00:08.00\n";
    let doc = normalize(content, SubtitleFormat::Ass);

    let entry = &doc.entries()[0];
    assert_eq!(entry.text, "Reordered");
    assert_eq!(entry.start, "00:00:08,000");
    assert_eq!(entry.end, "00:00:09,000");
}

#[test]
fn test_ass_withSecondFormatLine_shouldReplaceFieldOrder() {
    let content = "[Events]\nFormat: Layer, Start, End, Text\nDialogue: 0,0:00:01.00,0:00:02.00,First\nFormat: Start, End, Text\nDialogue: 0:00:03.00,0:00:04.00,Second\n";
    let doc = normalize(content, SubtitleFormat::Ass);

    assert_eq!(doc.len(), 2);
    assert_eq!(doc.entries()[1].text, "Second");
    assert_eq!(doc.entries()[1].start, "00:00:03,000");
}

#[test]
fn test_ass_withMissingEndValue_shouldSkipDialogue() {
    let content = "[Events]\nFormat: Layer, Start, End, Text\nDialogue: 0,0:00:01.00\nDialogue: 0,0:00:02.00,0:00:03.00,Ok\n";
    let doc = normalize(content, SubtitleFormat::Ass);

    assert_eq!(doc.len(), 1);
    assert_eq!(doc.entries()[0].text, "Ok");
}

#[test]
fn test_ass_withMissingTextField_shouldDropEntry() {
    let content = "[Events]\nFormat: Layer, Start, End\nDialogue: 0,0:00:01.00,0:00:02.00\n";
    assert!(normalize(content, SubtitleFormat::Ass).is_empty());
}

#[test]
fn test_ass_withUnrecognizedTime_shouldPassValueThrough() {
    let content = "[Events]\nFormat: Start, End, Text\nDialogue: later,0:00:02.00,Odd timing\n";
    let doc = normalize(content, SubtitleFormat::Ass);

    assert_eq!(doc.entries()[0].start, "later");
    assert_eq!(doc.entries()[0].end, "00:00:02,000");
}

#[test]
fn test_splitFields_withPositionOverride_shouldKeepFieldCount() {
    let line = r"0,0:00:01.00,0:00:02.00,Default,,0,0,0,,{\pos(100,200)}Hi";
    let fields = split_fields(line);

    assert_eq!(fields.len(), 10);
    assert_eq!(fields[9], r"{\pos(100,200)}Hi");
}
