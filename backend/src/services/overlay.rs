//! Informational overlays: static reference content keyed by topic.
//!
//! Content is structured (typed blocks), never raw markup; the page layer is
//! responsible for escaping every string it renders.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{AcuityBand, BAND_THRESHOLDS};
use crate::services::estimator::format_diopters;

/// Which overlay to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayTopic {
    Sphere,
    Cylinder,
    Axis,
    Result,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown overlay topic '{0}'")]
pub struct UnknownTopic(pub String);

impl OverlayTopic {
    pub const ALL: [OverlayTopic; 4] = [
        OverlayTopic::Sphere,
        OverlayTopic::Cylinder,
        OverlayTopic::Axis,
        OverlayTopic::Result,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            OverlayTopic::Sphere => "sphere",
            OverlayTopic::Cylinder => "cylinder",
            OverlayTopic::Axis => "axis",
            OverlayTopic::Result => "result",
        }
    }
}

impl FromStr for OverlayTopic {
    type Err = UnknownTopic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OverlayTopic::ALL
            .into_iter()
            .find(|topic| topic.slug() == s)
            .ok_or_else(|| UnknownTopic(s.to_string()))
    }
}

impl fmt::Display for OverlayTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// One block of overlay content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph { text: String },
    BulletList { items: Vec<String> },
    Table { header: Vec<String>, rows: Vec<Vec<String>> },
}

impl Block {
    fn paragraph(text: &str) -> Self {
        Block::Paragraph {
            text: text.to_string(),
        }
    }

    fn bullets(items: &[&str]) -> Self {
        Block::BulletList {
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Title plus ordered blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayContent {
    pub title: String,
    pub blocks: Vec<Block>,
}

/// Static content for a topic.
pub fn content(topic: OverlayTopic) -> OverlayContent {
    match topic {
        OverlayTopic::Sphere => OverlayContent {
            title: "球面度数（S）の目安".to_string(),
            blocks: vec![
                Block::paragraph(
                    "近視・遠視を矯正する度数です。マイナスは近視、プラスは遠視を表します。",
                ),
                Block::bullets(&[
                    "正常視：0.00D",
                    "軽度近視：-0.25D 〜 -2.00D",
                    "中等度近視：-2.25D 〜 -5.00D",
                    "強度近視：-5.25D 以下",
                    "軽度遠視：+0.25D 〜 +2.00D",
                    "強度遠視：+2.25D 以上",
                ]),
            ],
        },
        OverlayTopic::Cylinder => OverlayContent {
            title: "乱視度数（C）の目安".to_string(),
            blocks: vec![
                Block::paragraph("乱視を矯正する度数です。この計算ではマイナス表記で入力します。"),
                Block::bullets(&[
                    "軽度乱視：-0.25D 〜 -1.00D",
                    "中等度乱視：-1.25D 〜 -2.00D",
                    "強度乱視：-2.25D 以下",
                ]),
            ],
        },
        OverlayTopic::Axis => OverlayContent {
            title: "乱視軸（AX）".to_string(),
            blocks: vec![
                Block::paragraph("乱視を矯正する向きを 0〜180 度で表します。"),
                Block::paragraph("参考として入力できますが、推定視力の計算には使用しません。"),
            ],
        },
        OverlayTopic::Result => OverlayContent {
            title: "等価球面度数と推定裸眼視力".to_string(),
            blocks: vec![
                Block::paragraph("等価球面度数（SE）= 球面度数 + 乱視度数 ÷ 2"),
                band_table(),
            ],
        },
    }
}

/// Table of the acuity bands, built from the threshold table itself.
fn band_table() -> Block {
    let mut rows: Vec<Vec<String>> = BAND_THRESHOLDS
        .iter()
        .map(|(lower, band)| {
            vec![
                format!("{}D 以上", format_diopters(*lower)),
                band.label().to_string(),
            ]
        })
        .collect();
    if let Some((lowest, _)) = BAND_THRESHOLDS.last() {
        rows.push(vec![
            format!("{}D 未満", format_diopters(*lowest)),
            AcuityBand::Below01.label().to_string(),
        ]);
    }
    Block::Table {
        header: vec!["等価球面度数（SE）".to_string(), "推定裸眼視力".to_string()],
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_slugs_parse_back() {
        for topic in OverlayTopic::ALL {
            assert_eq!(topic.slug().parse::<OverlayTopic>().unwrap(), topic);
        }
        assert!("glossary".parse::<OverlayTopic>().is_err());
    }

    #[test]
    fn test_every_topic_has_content() {
        for topic in OverlayTopic::ALL {
            let c = content(topic);
            assert!(!c.title.is_empty());
            assert!(!c.blocks.is_empty());
        }
    }

    #[test]
    fn test_result_table_covers_every_band() {
        let c = content(OverlayTopic::Result);
        let Some(Block::Table { header, rows }) = c.blocks.last() else {
            panic!("result overlay should end with a table");
        };
        assert_eq!(header.len(), 2);
        assert_eq!(rows.len(), BAND_THRESHOLDS.len() + 1);
        assert_eq!(rows[0], vec!["-0.25D 以上", "1.0〜1.5以上"]);
        assert_eq!(rows[7], vec!["-3.00D 未満", "0.1未満"]);
    }

    #[test]
    fn test_block_serialization_is_tagged() {
        let json = serde_json::to_value(Block::paragraph("x")).unwrap();
        assert_eq!(json["type"], "paragraph");
        assert_eq!(json["text"], "x");
    }
}
