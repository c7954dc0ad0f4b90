//! Plain-text export of the current result and the analysis history.
//!
//! [`HistoryStats`] gathers the aggregate numbers, [`ReportWriter`] lays the
//! text out. [`generate_report`] ties the two together and is deterministic
//! for a fixed `generated_at`.

use chrono::{DateTime, FixedOffset};

use crate::config::{REPORT_FILE_PREFIX, TOP_TYPES_LIMIT};
use crate::types::{display_timestamp, AnalysisRecord, Detection, DetectionResult};

const BANNER: &str = "========================================";
const NARROW_RULE: usize = 40;
const WIDE_RULE: usize = 60;
const NO_POSITION: &str = "N/A";
const UNKNOWN_IMAGE: &str = "Unknown";

/// A rendered report, ready to be offered as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub file_name: String,
    pub content: String,
}

impl Report {
    pub fn new(content: String, generated_at: &DateTime<FixedOffset>) -> Self {
        Self {
            file_name: report_file_name(generated_at),
            content,
        }
    }
}

/// `InventoryLens-Report-<date>-<unix millis>.txt`
pub fn report_file_name(generated_at: &DateTime<FixedOffset>) -> String {
    format!(
        "{REPORT_FILE_PREFIX}-{}-{}.txt",
        generated_at.date_naive().format("%Y-%m-%d"),
        generated_at.timestamp_millis()
    )
}

/// Formats `value` with one decimal the way a browser's `toFixed(1)` does.
///
/// Rounding works on the exact binary value, so `1.45` (stored just below
/// the half) gives `1.4`. Only values with an odd `value * 4` sit exactly on
/// a half; those round away from zero.
pub fn fixed1(value: f64) -> String {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && (quarters % 2.0).abs() == 1.0 {
        format!("{:.1}", (value * 10.0).round() / 10.0)
    } else {
        format!("{value:.1}")
    }
}

/// Share of `count` in `total`, in percent; 0 when `total` is 0.
pub fn share_percent(count: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(count) / f64::from(total) * 100.0
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn position(detection: &Detection) -> String {
    match detection.bbox {
        Some(bbox) => format!("X:{}, Y:{}", round_half_up(bbox.xmin), round_half_up(bbox.ymin)),
        None => NO_POSITION.to_string(),
    }
}

/// Aggregates over the whole history.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStats {
    pub entries: usize,
    pub total_objects: u64,
    /// Object types by aggregate count, descending; ties keep first-seen order.
    pub top_types: Vec<(String, u64)>,
}

impl HistoryStats {
    pub fn from_history(history: &[AnalysisRecord]) -> Self {
        let mut totals: Vec<(String, u64)> = Vec::new();
        for record in history {
            for (label, count) in record.detection.object_counts.iter() {
                match totals.iter_mut().find(|(name, _)| name == label) {
                    Some(entry) => entry.1 += u64::from(*count),
                    None => totals.push((label.clone(), u64::from(*count))),
                }
            }
        }
        // sort_by is stable, which is what keeps ties in first-seen order.
        totals.sort_by(|a, b| b.1.cmp(&a.1));
        totals.truncate(TOP_TYPES_LIMIT);

        Self {
            entries: history.len(),
            total_objects: history
                .iter()
                .map(|record| u64::from(record.detection.total_objects))
                .sum(),
            top_types: totals,
        }
    }

    /// Mean objects per entry; 0 for an empty history.
    pub fn average_per_entry(&self) -> f64 {
        if self.entries == 0 {
            return 0.0;
        }
        self.total_objects as f64 / self.entries as f64
    }
}

/// Line-oriented text builder for the report layout.
#[derive(Debug, Default)]
pub struct ReportWriter {
    buf: String,
}

impl ReportWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.buf.push_str(text.as_ref());
        self.buf.push('\n');
        self
    }

    fn blank(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    fn rule(&mut self, width: usize) -> &mut Self {
        self.line("-".repeat(width))
    }

    pub fn header(&mut self, generated_at: &DateTime<FixedOffset>) -> &mut Self {
        self.line(BANNER)
            .line("       INVENTORYLENS AI REPORT")
            .line(BANNER)
            .line(format!("Generated: {}", display_timestamp(generated_at)))
            .blank()
    }

    pub fn current_result(
        &mut self,
        result: &DetectionResult,
        image_name: Option<&str>,
    ) -> &mut Self {
        self.line("--- CURRENT ANALYSIS RESULTS ---")
            .line(format!("Image: {}", image_name.unwrap_or(UNKNOWN_IMAGE)))
            .line(format!("Total Objects Found: {}", result.total_objects))
            .line(format!("Analysis Summary: {}", result.summary))
            .blank();

        if !result.object_counts.is_empty() {
            self.line("OBJECT SUMMARY BY TYPE:").rule(NARROW_RULE);
            for (label, count) in result.object_counts.iter() {
                let percent = fixed1(share_percent(*count, result.total_objects));
                self.line(format!("{label:<20} : {count:>3} ({percent}%)"));
            }
            self.blank();
        }

        if !result.detections.is_empty() {
            self.line("DETAILED OBJECT DETECTIONS:")
                .rule(WIDE_RULE)
                .line(format!("{:<4}{:<20}{:<12}Position", "#", "Object Type", "Confidence"))
                .rule(WIDE_RULE);
            for (index, detection) in result.detections.iter().enumerate() {
                let confidence = fixed1(detection.confidence * 100.0);
                self.line(format!(
                    "{:<4}{:<20}{:<10}%  {}",
                    index + 1,
                    detection.label,
                    confidence,
                    position(detection)
                ));
            }
            self.blank();
        }
        self
    }

    pub fn history(&mut self, history: &[AnalysisRecord]) -> &mut Self {
        if history.is_empty() {
            return self;
        }

        self.line("--- ANALYSIS HISTORY ---")
            .line(format!("Total Analyses Performed: {}", history.len()))
            .blank();

        for (index, record) in history.iter().enumerate() {
            let types = record
                .detection
                .object_counts
                .iter()
                .map(|(label, count)| format!("{label}({count})"))
                .collect::<Vec<_>>()
                .join(", ");
            self.line(format!("{}. {}", index + 1, record.filename))
                .line(format!("   Date: {}", record.display_timestamp()))
                .line("   Type: Full Analysis")
                .line(format!("   Objects Found: {}", record.detection.total_objects))
                .line(format!("   Object Types: {types}"))
                .blank();
        }

        let stats = HistoryStats::from_history(history);
        self.line("--- SUMMARY STATISTICS ---")
            .line(format!("Total Objects Analyzed: {}", stats.total_objects))
            .line(format!(
                "Average Objects per Image: {}",
                fixed1(stats.average_per_entry())
            ));

        if !stats.top_types.is_empty() {
            self.blank().line("Most Common Object Types:");
            for (index, (label, count)) in stats.top_types.iter().enumerate() {
                self.line(format!("{}. {label}: {count} times", index + 1));
            }
        }
        self
    }

    pub fn footer(&mut self) -> &mut Self {
        self.blank()
            .line(BANNER)
            .line("Report generated by InventoryLens AI")
            .line(BANNER)
    }

    pub fn finish(&mut self) -> String {
        std::mem::take(&mut self.buf)
    }
}

pub fn generate_report(
    current_result: Option<&DetectionResult>,
    current_image_name: Option<&str>,
    history: &[AnalysisRecord],
    generated_at: &DateTime<FixedOffset>,
) -> String {
    let mut writer = ReportWriter::new();
    writer.header(generated_at);
    if let Some(result) = current_result {
        writer.current_result(result, current_image_name);
    }
    writer.history(history).footer().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DetectionBox, ObjectCounts};
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 16, 14, 5, 9)
            .unwrap()
    }

    fn counts(pairs: &[(&str, u32)]) -> ObjectCounts {
        pairs
            .iter()
            .map(|(label, count)| (label.to_string(), *count))
            .collect::<Vec<_>>()
            .into()
    }

    fn record(name: &str, pairs: &[(&str, u32)]) -> AnalysisRecord {
        let total = pairs.iter().map(|(_, c)| c).sum();
        AnalysisRecord::new(
            name,
            at(),
            DetectionResult {
                total_objects: total,
                summary: String::new(),
                object_counts: counts(pairs),
                detections: Vec::new(),
            },
        )
    }

    fn boxes() -> DetectionResult {
        DetectionResult {
            total_objects: 2,
            summary: "2 boxes found".into(),
            object_counts: counts(&[("box", 2)]),
            detections: vec![
                Detection {
                    label: "box".into(),
                    confidence: 0.91,
                    bbox: Some(DetectionBox {
                        xmin: 10.0,
                        ymin: 20.0,
                        xmax: 50.0,
                        ymax: 60.0,
                    }),
                },
                Detection {
                    label: "box".into(),
                    confidence: 0.77,
                    bbox: None,
                },
            ],
        }
    }

    #[test]
    fn empty_session_has_only_banner_and_footer() {
        let text = generate_report(None, None, &[], &at());
        let expected = "\
========================================
       INVENTORYLENS AI REPORT
========================================
Generated: 10/16/2026, 2:05:09 PM


========================================
Report generated by InventoryLens AI
========================================
";
        assert_eq!(text, expected);
    }

    #[test]
    fn current_result_section() {
        let text = generate_report(Some(&boxes()), Some("shelf.jpg"), &[], &at());
        assert!(text.contains("--- CURRENT ANALYSIS RESULTS ---\nImage: shelf.jpg\n"));
        assert!(text.contains("Total Objects Found: 2\n"));
        assert!(text.contains("Analysis Summary: 2 boxes found\n"));
        assert!(text.contains("box                  :   2 (100.0%)\n"));
        assert!(text.contains("#   Object Type         Confidence  Position\n"));
        assert!(text.contains("1   box                 91.0      %  X:10, Y:20\n"));
        assert!(text.contains("2   box                 77.0      %  N/A\n"));
        assert!(!text.contains("--- ANALYSIS HISTORY ---"));
    }

    #[test]
    fn unknown_image_name() {
        let text = generate_report(Some(&boxes()), None, &[], &at());
        assert!(text.contains("Image: Unknown\n"));
    }

    #[test]
    fn history_section_and_statistics() {
        let history = vec![
            record("b.jpg", &[("chair", 2), ("cup", 1)]),
            record("a.jpg", &[("cup", 2)]),
        ];
        let text = generate_report(None, None, &history, &at());

        assert!(text.contains("Total Analyses Performed: 2\n"));
        assert!(text.contains(
            "1. b.jpg\n\
             \x20  Date: 10/16/2026, 2:05:09 PM\n\
             \x20  Type: Full Analysis\n\
             \x20  Objects Found: 3\n\
             \x20  Object Types: chair(2), cup(1)\n"
        ));
        assert!(text.contains("Total Objects Analyzed: 5\n"));
        assert!(text.contains("Average Objects per Image: 2.5\n"));
        assert!(text.contains("Most Common Object Types:\n1. cup: 3 times\n2. chair: 2 times\n"));
    }

    #[test]
    fn top_types_ties_keep_first_seen_order() {
        let history = vec![
            record("1.jpg", &[("lamp", 1), ("desk", 2)]),
            record(
                "2.jpg",
                &[("pen", 2), ("lamp", 1), ("mug", 1), ("book", 1), ("cable", 1)],
            ),
        ];
        let stats = HistoryStats::from_history(&history);
        let names: Vec<&str> = stats.top_types.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["lamp", "desk", "pen", "mug", "book"]);
    }

    #[test]
    fn zero_total_renders_zero_percent() {
        let result = DetectionResult {
            total_objects: 0,
            object_counts: counts(&[("ghost", 1)]),
            ..Default::default()
        };
        let text = generate_report(Some(&result), Some("x.png"), &[], &at());
        assert!(text.contains("ghost                :   1 (0.0%)\n"));
    }

    #[test]
    fn average_of_empty_history_is_zero() {
        assert_eq!(HistoryStats::from_history(&[]).average_per_entry(), 0.0);
    }

    #[test]
    fn average_renders_one_decimal() {
        let history = vec![
            record("a", &[("x", 1)]),
            record("b", &[("x", 1)]),
            record("c", &[("x", 2)]),
        ];
        let text = generate_report(None, None, &history, &at());
        assert!(text.contains("Average Objects per Image: 1.3\n"));
    }

    #[test]
    fn fixed1_matches_browser_rounding() {
        assert_eq!(fixed1(1.45), "1.4");
        assert_eq!(fixed1(1.55), "1.6");
        assert_eq!(fixed1(0.25), "0.3");
        assert_eq!(fixed1(0.75), "0.8");
        assert_eq!(fixed1(2.5), "2.5");
        assert_eq!(fixed1(100.0), "100.0");
        assert_eq!(fixed1(0.0), "0.0");
    }

    #[test]
    fn confidence_near_tie_rounds_like_the_browser() {
        let result = DetectionResult {
            total_objects: 1,
            object_counts: counts(&[("cup", 1)]),
            detections: vec![Detection {
                label: "cup".into(),
                confidence: 0.5555,
                bbox: None,
            }],
            ..Default::default()
        };
        let text = generate_report(Some(&result), None, &[], &at());
        assert!(text.contains("1   cup                 55.5      %  N/A\n"));
    }

    #[test]
    fn positions_round_half_up() {
        let detection = Detection {
            label: "x".into(),
            confidence: 1.0,
            bbox: Some(DetectionBox {
                xmin: 2.5,
                ymin: -2.5,
                xmax: 0.0,
                ymax: 0.0,
            }),
        };
        assert_eq!(position(&detection), "X:3, Y:-2");
    }

    #[test]
    fn file_name_has_date_and_millis() {
        let name = report_file_name(&at());
        assert_eq!(
            name,
            format!("InventoryLens-Report-2026-10-16-{}.txt", at().timestamp_millis())
        );
    }

    #[test]
    fn report_is_deterministic() {
        let history = vec![record("a.jpg", &[("cup", 2)])];
        let first = generate_report(Some(&boxes()), Some("a.jpg"), &history, &at());
        let second = generate_report(Some(&boxes()), Some("a.jpg"), &history, &at());
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn percentages_sum_to_hundred(parts in prop::collection::vec(1u32..500, 1..12)) {
            let total: u32 = parts.iter().sum();
            let sum: f64 = parts
                .iter()
                .map(|count| fixed1(share_percent(*count, total)).parse::<f64>().unwrap())
                .sum();
            prop_assert!((sum - 100.0).abs() <= 0.1 * parts.len() as f64 + 1e-9);
        }

        #[test]
        fn top_types_sorted_descending(
            entries in prop::collection::vec(
                prop::collection::vec((0usize..8, 1u32..20), 0..6),
                1..10,
            )
        ) {
            let history: Vec<AnalysisRecord> = entries
                .iter()
                .enumerate()
                .map(|(i, pairs)| {
                    let mut seen: Vec<(String, u32)> = Vec::new();
                    for (label, count) in pairs {
                        let label = format!("type-{label}");
                        if !seen.iter().any(|(l, _)| *l == label) {
                            seen.push((label, *count));
                        }
                    }
                    let total = seen.iter().map(|(_, c)| c).sum();
                    AnalysisRecord::new(format!("{i}.jpg"), at(), DetectionResult {
                        total_objects: total,
                        object_counts: seen.into(),
                        ..Default::default()
                    })
                })
                .collect();

            let stats = HistoryStats::from_history(&history);
            prop_assert!(stats.top_types.len() <= TOP_TYPES_LIMIT);
            for pair in stats.top_types.windows(2) {
                prop_assert!(pair[0].1 >= pair[1].1);
            }
            let expected_avg = stats.total_objects as f64 / history.len() as f64;
            prop_assert_eq!(stats.average_per_entry(), expected_avg);
        }
    }
}
