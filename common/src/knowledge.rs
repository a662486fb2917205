//! 品目ナレッジベース
//!
//! - ITEM_KNOWLEDGE: 特定品目ごとの分別手順・アップサイクル案
//! - category_defaults: カテゴリ単位の既定手順（ナレッジベース未該当時）
//! - lookup_barcode: バーコード → 品目の簡易データベース

use crate::types::{ClassificationResult, ItemKnowledgeEntry, WasteCategory};

/// 品目ナレッジベース（走査順 = 定義順）
pub const ITEM_KNOWLEDGE: &[ItemKnowledgeEntry] = &[
    ItemKnowledgeEntry {
        match_key: "plastic bottle",
        display_name: "Plastic Bottle",
        category: WasteCategory::Plastics,
        preparation_steps: &[
            "Remove cap and label",
            "Rinse thoroughly with water",
            "Crush to save space",
            "Place in designated plastics bin",
        ],
        upcycling_tip: "Cut in half and use as a planter, bird feeder, or pencil holder",
        contaminated: false,
    },
    ItemKnowledgeEntry {
        match_key: "glass bottle",
        display_name: "Glass Bottle",
        category: WasteCategory::Glass,
        preparation_steps: &[
            "Remove lid and rinse",
            "Remove labels if possible",
            "Separate by color if required",
            "Place carefully in glass bin",
        ],
        upcycling_tip: "Use as a vase, candle holder, or decorative storage container",
        contaminated: false,
    },
    ItemKnowledgeEntry {
        match_key: "aluminum can",
        display_name: "Aluminum Can",
        category: WasteCategory::Plastics,
        preparation_steps: &[
            "Rinse inside thoroughly",
            "Crush to save space",
            "Remove any paper labels",
            "Place in recycling bin",
        ],
        upcycling_tip: "Use as small planters, pen holders, or candle holders",
        contaminated: false,
    },
    ItemKnowledgeEntry {
        match_key: "cardboard box",
        display_name: "Cardboard Box",
        category: WasteCategory::Paper,
        preparation_steps: &[
            "Flatten the box completely",
            "Remove any tape or staples",
            "Keep dry and clean",
            "Bundle together if multiple boxes",
        ],
        upcycling_tip: "Use for DIY storage boxes, cat houses, or children's craft projects",
        contaminated: false,
    },
    ItemKnowledgeEntry {
        match_key: "food waste",
        display_name: "Food Waste",
        category: WasteCategory::Bio,
        preparation_steps: &[
            "Remove any packaging",
            "Drain excess liquid",
            "No meat or dairy in some regions",
            "Place in organic waste bin",
        ],
        upcycling_tip: "Create compost for your garden by mixing with dry leaves",
        contaminated: false,
    },
    ItemKnowledgeEntry {
        match_key: "battery",
        display_name: "Battery",
        category: WasteCategory::Ewaste,
        preparation_steps: &[
            "Do NOT throw in regular bins",
            "Tape terminals of lithium batteries",
            "Store in cool, dry place",
            "Take to e-waste collection center",
        ],
        upcycling_tip: "Take to designated e-waste collection centers. Never dispose with regular trash.",
        contaminated: true,
    },
    ItemKnowledgeEntry {
        match_key: "paper",
        display_name: "Paper",
        category: WasteCategory::Paper,
        preparation_steps: &[
            "Keep dry and clean",
            "Remove any plastic coating",
            "Stack neatly",
            "Place in paper recycling bin",
        ],
        upcycling_tip: "Use for wrapping gifts, cleaning windows, or as mulch for gardening",
        contaminated: false,
    },
];

/// カテゴリ既定値（手順・アップサイクル案・汚染フラグ）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryDefaults {
    pub preparation_steps: &'static [&'static str],
    pub upcycling_tip: &'static str,
    pub contaminated: bool,
}

/// カテゴリごとの既定値（1カテゴリ1行）
pub fn category_defaults(category: WasteCategory) -> CategoryDefaults {
    match category {
        WasteCategory::Plastics => CategoryDefaults {
            preparation_steps: &[
                "Rinse and clean thoroughly",
                "Remove any labels or caps",
                "Dry completely",
                "Place in designated plastics bin",
            ],
            upcycling_tip: "Consider reusing or repurposing before recycling",
            contaminated: false,
        },
        WasteCategory::Paper => CategoryDefaults {
            preparation_steps: &[
                "Keep dry and clean",
                "Remove any non-paper materials",
                "Flatten if possible",
                "Place in paper recycling bin",
            ],
            upcycling_tip: "Use for crafts, wrapping, or composting",
            contaminated: false,
        },
        WasteCategory::Glass => CategoryDefaults {
            preparation_steps: &[
                "Rinse thoroughly",
                "Remove lids and caps",
                "Separate by color if required",
                "Handle carefully",
            ],
            upcycling_tip: "Use for storage, decoration, or DIY projects",
            contaminated: false,
        },
        WasteCategory::Bio => CategoryDefaults {
            preparation_steps: &[
                "Remove packaging",
                "Drain excess liquid",
                "Cut large items into smaller pieces",
                "Place in organic waste bin",
            ],
            upcycling_tip: "Create compost for nutrient-rich garden soil",
            contaminated: false,
        },
        WasteCategory::Ewaste => CategoryDefaults {
            preparation_steps: &[
                "Do NOT throw in regular bins",
                "Remove batteries if possible",
                "Delete personal data from devices",
                "Take to e-waste collection center",
            ],
            upcycling_tip: "Donate working items or take to proper e-waste facility",
            contaminated: true,
        },
        WasteCategory::Residual => CategoryDefaults {
            preparation_steps: &[
                "Check if item can be recycled",
                "Keep separate from recyclables",
                "Place in general waste bin",
            ],
            upcycling_tip: "Consider if item can be reused before disposal",
            contaminated: false,
        },
    }
}

/// 説明文に双方向部分一致する最初の品目を返す
pub fn find_item(description: &str) -> Option<&'static ItemKnowledgeEntry> {
    ITEM_KNOWLEDGE
        .iter()
        .find(|entry| crate::keywords::matches_bidirectional(description, entry.match_key))
}

fn to_owned_steps(steps: &[&str]) -> Vec<String> {
    steps.iter().map(|s| s.to_string()).collect()
}

impl ItemKnowledgeEntry {
    /// 手順を所有型で取得
    pub fn steps(&self) -> Vec<String> {
        to_owned_steps(self.preparation_steps)
    }
}

impl CategoryDefaults {
    pub fn steps(&self) -> Vec<String> {
        to_owned_steps(self.preparation_steps)
    }
}

struct BarcodeEntry {
    code: &'static str,
    name: &'static str,
    category: WasteCategory,
    preparation_steps: &'static [&'static str],
    upcycling_tip: &'static str,
}

const BARCODE_TABLE: &[BarcodeEntry] = &[
    BarcodeEntry {
        code: "5449000000996",
        name: "Coca-Cola Bottle",
        category: WasteCategory::Plastics,
        preparation_steps: &["Rinse bottle", "Remove cap", "Recycle cap separately"],
        upcycling_tip: "Use as water bottle holder or craft material",
    },
    BarcodeEntry {
        code: "012000161551",
        name: "Sprite Can",
        category: WasteCategory::Plastics,
        preparation_steps: &["Rinse can", "Crush to save space"],
        upcycling_tip: "Use for small storage or craft projects",
    },
];

/// バーコードで品目を検索
///
/// 未登録のバーコードは "Unknown Product"（residual）を返す。
pub fn lookup_barcode(barcode: &str) -> ClassificationResult {
    let code = barcode.trim();
    match BARCODE_TABLE.iter().find(|e| e.code == code) {
        Some(entry) => ClassificationResult {
            name: entry.name.to_string(),
            category: entry.category,
            confidence: 1.0,
            preparation_steps: to_owned_steps(entry.preparation_steps),
            upcycling_tip: Some(entry.upcycling_tip.to_string()),
            contaminated: false,
            detected_labels: Vec::new(),
            ai_generated: false,
        },
        None => ClassificationResult {
            name: "Unknown Product".to_string(),
            category: WasteCategory::Residual,
            confidence: 0.0,
            preparation_steps: vec!["Check product packaging for disposal instructions".to_string()],
            upcycling_tip: None,
            contaminated: false,
            detected_labels: Vec::new(),
            ai_generated: false,
        },
    }
}
