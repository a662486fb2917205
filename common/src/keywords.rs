//! カテゴリキーワード表
//!
//! 画像認識の汎用ラベルを6カテゴリへ粗く割り当てる。
//! 品目ナレッジベースに該当しなかった場合の第2パスで使用。

use crate::types::{KeywordMapping, WasteCategory};

const fn kw(keyword: &'static str, category: WasteCategory) -> KeywordMapping {
    KeywordMapping { keyword, category }
}

/// キーワード表（走査順 = 定義順、キーワードは一意）
pub const KEYWORD_TABLE: &[KeywordMapping] = &[
    // プラスチック・缶
    kw("plastic", WasteCategory::Plastics),
    kw("bottle", WasteCategory::Plastics),
    kw("plastic bottle", WasteCategory::Plastics),
    kw("container", WasteCategory::Plastics),
    kw("packaging", WasteCategory::Plastics),
    kw("bag", WasteCategory::Plastics),
    kw("wrapper", WasteCategory::Plastics),
    kw("can", WasteCategory::Plastics),
    kw("aluminum", WasteCategory::Plastics),
    kw("metal", WasteCategory::Plastics),
    // 紙
    kw("paper", WasteCategory::Paper),
    kw("cardboard", WasteCategory::Paper),
    kw("newspaper", WasteCategory::Paper),
    kw("magazine", WasteCategory::Paper),
    kw("book", WasteCategory::Paper),
    kw("document", WasteCategory::Paper),
    kw("box", WasteCategory::Paper),
    kw("carton", WasteCategory::Paper),
    // ガラス
    kw("glass", WasteCategory::Glass),
    kw("jar", WasteCategory::Glass),
    kw("glass bottle", WasteCategory::Glass),
    kw("glass container", WasteCategory::Glass),
    // 生ごみ
    kw("food", WasteCategory::Bio),
    kw("fruit", WasteCategory::Bio),
    kw("vegetable", WasteCategory::Bio),
    kw("organic", WasteCategory::Bio),
    kw("plant", WasteCategory::Bio),
    kw("leaf", WasteCategory::Bio),
    kw("peel", WasteCategory::Bio),
    kw("compost", WasteCategory::Bio),
    // 電子ごみ
    kw("battery", WasteCategory::Ewaste),
    kw("electronic", WasteCategory::Ewaste),
    kw("electronics", WasteCategory::Ewaste),
    kw("phone", WasteCategory::Ewaste),
    kw("computer", WasteCategory::Ewaste),
    kw("device", WasteCategory::Ewaste),
    kw("gadget", WasteCategory::Ewaste),
    kw("wire", WasteCategory::Ewaste),
    kw("cable", WasteCategory::Ewaste),
    // 残渣
    kw("trash", WasteCategory::Residual),
    kw("waste", WasteCategory::Residual),
    kw("garbage", WasteCategory::Residual),
];

/// 双方向の部分一致判定
///
/// どちらかがもう一方を含んでいれば一致とみなす。
pub fn matches_bidirectional(description: &str, key: &str) -> bool {
    description.contains(key) || key.contains(description)
}

/// 説明文に一致する最初のキーワードのカテゴリを返す
pub fn lookup_keyword(description: &str) -> Option<WasteCategory> {
    KEYWORD_TABLE
        .iter()
        .find(|m| matches_bidirectional(description, m.keyword))
        .map(|m| m.category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keywords_are_unique() {
        let mut seen = HashSet::new();
        for mapping in KEYWORD_TABLE {
            assert!(seen.insert(mapping.keyword), "重複キーワード: {}", mapping.keyword);
        }
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for mapping in KEYWORD_TABLE {
            assert_eq!(mapping.keyword, mapping.keyword.to_lowercase());
        }
    }

    #[test]
    fn test_matches_bidirectional() {
        assert!(matches_bidirectional("banana peel", "peel"));
        assert!(matches_bidirectional("jar", "glass jar"));
        assert!(!matches_bidirectional("tree", "plastic"));
    }

    #[test]
    fn test_lookup_keyword_table_order() {
        assert_eq!(lookup_keyword("copper wire"), Some(WasteCategory::Ewaste));
        assert_eq!(lookup_keyword("banana peel"), Some(WasteCategory::Bio));
        // "glass bottle" は先に定義された "bottle" に当たる
        assert_eq!(lookup_keyword("glass bottle"), Some(WasteCategory::Plastics));
        assert_eq!(lookup_keyword("sky"), None);
    }

    #[test]
    fn test_every_category_has_keywords() {
        for category in WasteCategory::ALL {
            assert!(KEYWORD_TABLE.iter().any(|m| m.category == category));
        }
    }
}
