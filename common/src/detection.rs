//! 検出結果の正規化
//!
//! ラベル検出とオブジェクト検出の2系統を1本の順位付きリストにまとめる。

use crate::error::{Error, Result};
use crate::types::{Annotation, AnnotationSets, Detection};
use std::cmp::Ordering;

/// 2系統のアノテーションを統合して信頼度順に並べる
///
/// - descriptionは小文字化
/// - ラベル → オブジェクトの順に連結してから安定ソート（同点は入力順）
/// - 非有限のスコアは末尾
///
/// # Errors
/// 両方とも空または欠落している場合は `Error::NoDetections`
pub fn normalize_detections(
    labels: Option<&[Annotation]>,
    objects: Option<&[Annotation]>,
) -> Result<Vec<Detection>> {
    let labels = labels.unwrap_or_default();
    let objects = objects.unwrap_or_default();

    if labels.is_empty() && objects.is_empty() {
        return Err(Error::NoDetections);
    }

    let mut detections: Vec<Detection> = labels
        .iter()
        .chain(objects.iter())
        .map(|a| Detection {
            description: a.description.to_lowercase(),
            score: a.score,
        })
        .collect();

    // sort_by は安定ソート
    detections.sort_by(|a, b| compare_scores_desc(a.score, b.score));

    Ok(detections)
}

/// AnnotationSets版
pub fn normalize_sets(sets: &AnnotationSets) -> Result<Vec<Detection>> {
    normalize_detections(sets.labels.as_deref(), sets.objects.as_deref())
}

fn compare_scores_desc(a: f64, b: f64) -> Ordering {
    match (a.is_finite(), b.is_finite()) {
        (true, true) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// 上位N件のdescriptionを取得
pub fn top_descriptions(detections: &[Detection], n: usize) -> Vec<String> {
    detections
        .iter()
        .take(n)
        .map(|d| d.description.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann(description: &str, score: f64) -> Annotation {
        Annotation::new(description, score)
    }

    #[test]
    fn test_normalize_lowercases_and_sorts() {
        let labels = vec![ann("Bottle", 0.7), ann("Plastic", 0.9)];
        let objects = vec![ann("Plastic Bottle", 0.8)];

        let detections = normalize_detections(Some(&labels), Some(&objects)).unwrap();
        let names: Vec<&str> = detections.iter().map(|d| d.description.as_str()).collect();
        assert_eq!(names, vec!["plastic", "plastic bottle", "bottle"]);
    }

    #[test]
    fn test_normalize_ties_keep_input_order() {
        let labels = vec![ann("b-label", 0.5), ann("a-label", 0.5)];
        let objects = vec![ann("c-object", 0.5)];

        let detections = normalize_detections(Some(&labels), Some(&objects)).unwrap();
        let names: Vec<&str> = detections.iter().map(|d| d.description.as_str()).collect();
        assert_eq!(names, vec!["b-label", "a-label", "c-object"]);
    }

    #[test]
    fn test_normalize_objects_only() {
        let objects = vec![ann("Banana", 0.6)];
        let detections = normalize_detections(None, Some(&objects)).unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].description, "banana");
    }

    #[test]
    fn test_normalize_empty_is_error() {
        assert!(matches!(normalize_detections(None, None), Err(Error::NoDetections)));
        assert!(matches!(
            normalize_detections(Some(&[]), Some(&[])),
            Err(Error::NoDetections)
        ));
    }

    #[test]
    fn test_normalize_nan_sorts_last() {
        let labels = vec![ann("nan", f64::NAN), ann("low", 0.1), ann("high", 0.9)];
        let detections = normalize_detections(Some(&labels), None).unwrap();
        assert_eq!(detections[0].description, "high");
        assert_eq!(detections[1].description, "low");
        assert_eq!(detections[2].description, "nan");
    }

    #[test]
    fn test_normalize_sets() {
        let sets = AnnotationSets {
            labels: Some(vec![ann("Glass", 0.4)]),
            objects: None,
        };
        let detections = normalize_sets(&sets).unwrap();
        assert_eq!(detections[0].description, "glass");
    }

    #[test]
    fn test_top_descriptions() {
        let detections: Vec<Detection> = (0..8)
            .map(|i| Detection {
                description: format!("d{}", i),
                score: 1.0 - i as f64 * 0.1,
            })
            .collect();
        let top = top_descriptions(&detections, 5);
        assert_eq!(top, vec!["d0", "d1", "d2", "d3", "d4"]);
    }
}
