use crate::dataset::FeatureRecord;
use shared::FeatureValue;

/// Rewrites boolean fields as `1`/`0` so every feature reaches the model
/// server as a number or string. Field names and order are untouched.
pub fn normalize(mut record: FeatureRecord) -> FeatureRecord {
    for value in record.values_mut() {
        if let FeatureValue::Bool(flag) = *value {
            *value = FeatureValue::from(i64::from(flag));
        }
    }
    record
}

pub fn normalize_all(records: Vec<FeatureRecord>) -> Vec<FeatureRecord> {
    records.into_iter().map(normalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger() -> FeatureRecord {
        FeatureRecord::from_iter([
            ("Age", FeatureValue::from(30_i64)),
            ("Sex_female", FeatureValue::Bool(false)),
            ("Sex_male", FeatureValue::Bool(true)),
            ("Embarked", FeatureValue::from("S")),
        ])
    }

    #[test]
    fn booleans_become_integers() {
        let record = normalize(passenger());

        assert_eq!(record.get("Sex_female"), Some(&FeatureValue::from(0_i64)));
        assert_eq!(record.get("Sex_male"), Some(&FeatureValue::from(1_i64)));
        assert!(
            record
                .values()
                .all(|value| !matches!(value, FeatureValue::Bool(_)))
        );
    }

    #[test]
    fn other_fields_and_order_are_preserved() {
        let original = passenger();
        let record = normalize(original.clone());

        assert_eq!(record.len(), original.len());
        let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Age", "Sex_female", "Sex_male", "Embarked"]);
        assert_eq!(record.get("Age"), original.get("Age"));
        assert_eq!(record.get("Embarked"), original.get("Embarked"));
    }

    #[test]
    fn normalizing_twice_is_the_same_as_once() {
        let once = normalize(passenger());
        let twice = normalize(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn record_without_booleans_is_unchanged() {
        let record = FeatureRecord::from_iter([
            ("Age", FeatureValue::from(41_i64)),
            ("Ticket", FeatureValue::from("A/5 21171")),
        ]);
        assert_eq!(normalize(record.clone()), record);
    }

    #[test]
    fn normalize_all_keeps_length_and_order() {
        let first = FeatureRecord::from_iter([("flag", FeatureValue::Bool(true))]);
        let second = FeatureRecord::from_iter([("flag", FeatureValue::Bool(false))]);

        let records = normalize_all(vec![first, second, FeatureRecord::new()]);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].get("flag"), Some(&FeatureValue::from(1_i64)));
        assert_eq!(records[1].get("flag"), Some(&FeatureValue::from(0_i64)));
        assert!(records[2].is_empty());
    }
}
