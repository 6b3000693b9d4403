// ═══════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════
mod shared_record_tests {
    use crate::args::Args;
    use crate::error::{IdentifierIssue, RecordError};
    use crate::record_read::RecordRead;
    use crate::record_value::RecordValue;
    use crate::shared_record::{SharedRecord, SharedRecordType, make_shared_record_type};

    fn point() -> SharedRecordType {
        SharedRecordType::new("Point", "x y").unwrap()
    }

    fn v(n: i64) -> RecordValue {
        RecordValue::from(n)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Factory
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_factory_metadata() {
        let point = point();
        assert_eq!(point.name(), "Point");
        assert_eq!(point.fields(), &["x", "y"]);
        assert_eq!(point.field_count(), 2);
        assert_eq!(point.doc(), "Point(x, y)");
        assert_eq!(point.signature(), "x, y");
    }

    #[test]
    fn test_factory_validates() {
        assert!(matches!(
            SharedRecordType::new("Bad", ["class"]),
            Err(RecordError::InvalidIdentifier { reason: IdentifierIssue::ReservedKeyword, .. })
        ));
        assert!(matches!(
            SharedRecordType::new("Point", ["x", "x"]),
            Err(RecordError::DuplicateField(_))
        ));
        let renamed = make_shared_record_type("Bad", ["class"], true).unwrap();
        assert_eq!(renamed.fields(), &["_0"]);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Construction
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_positional_keyword_equivalence() {
        let point = point();
        let p = point.call(Args::positional([11, 22])).unwrap();
        assert_eq!(p, point.call(Args::new().kw("x", 11).kw("y", 22)).unwrap());
        assert_eq!(p, point.call(Args::new().pos(11).kw("y", 22)).unwrap());
        assert_eq!(p, point.call(Args::new().pos(vec![11i64, 22])).unwrap());
        assert_eq!(p, point.make([11, 22]).unwrap());
        assert_eq!(p, point.from_mapping([("y", 22), ("x", 11)]).unwrap());
    }

    #[test]
    fn test_concrete_point_sums() {
        let p = point().call(Args::new().pos(11).kw("y", 22)).unwrap();
        assert_eq!(p[0].as_i64().unwrap() + p[1].as_i64().unwrap(), 33);
        let x = p.field("x").unwrap().as_i64().unwrap();
        let y = p.field("y").unwrap().as_i64().unwrap();
        assert_eq!(x + y, 33);
    }

    #[test]
    fn test_construction_errors() {
        let point = point();
        assert!(matches!(
            point.call(Args::positional([1])),
            Err(RecordError::MissingField { .. })
        ));
        assert!(matches!(
            point.call(Args::positional([1, 2, 3])),
            Err(RecordError::ArityError { .. })
        ));
        assert!(matches!(
            point.call(Args::new().kw("x", 1).kw("y", 2).kw("z", 3)),
            Err(RecordError::UnexpectedField { ref fields, .. }) if fields == &["z"]
        ));
        assert!(matches!(
            point.make([1, 2, 3]),
            Err(RecordError::ArityError { expected: 2, actual: 3, .. })
        ));
    }

    #[test]
    fn test_call_and_make_agree() {
        let pair = SharedRecordType::new("Pair", "a b").unwrap();
        let r = pair.call(Args::positional([1, 2])).unwrap();
        let m = pair.make([1, 2]).unwrap();
        assert_eq!(r, m);
        assert_eq!(r.to_string(), "Pair(a=1, b=2)");
    }

    #[test]
    fn test_unvalidated_shape_cannot_become_a_record() {
        let err = SharedRecord::from_parts(
            "not a name!",
            vec!["x".into(), "y".into()],
            vec![v(1), v(2)],
        );
        assert!(matches!(
            err,
            Err(RecordError::InvalidIdentifier { reason: IdentifierIssue::InvalidCharacters, .. })
        ));
        let err = SharedRecord::from_parts(
            "Point",
            vec!["x".into(), "x".into(), "9bad".into()],
            vec![v(1), v(2), v(3)],
        );
        assert!(matches!(
            err,
            Err(RecordError::InvalidIdentifier { reason: IdentifierIssue::LeadingDigit, .. })
        ));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Read access
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_runtime_field_lookup() {
        let p = point().make([3, 4]).unwrap();
        assert_eq!(p.field("y"), Ok(&v(4)));
        assert_eq!(p.position("x"), Some(0));
        assert!(matches!(
            p.field("nope"),
            Err(RecordError::NoSuchField { ref field, .. }) if field == "nope"
        ));
        assert_eq!(p.fields(), &["x", "y"]);
        assert_eq!(p.typename(), "Point");
    }

    #[test]
    fn test_iteration_is_restartable() {
        let p = point().make([3, 4]).unwrap();
        let first: Vec<_> = p.iter().collect();
        let second: Vec<_> = (&p).into_iter().collect();
        assert_eq!(first, second);
        for i in 0..p.len() {
            assert_eq!(&p[i], first[i]);
        }
    }

    #[test]
    fn test_mapping_round_trip() {
        let t = SharedRecordType::new("T", "b a c").unwrap();
        let r = t.make([1, 2, 3]).unwrap();
        let mapping = r.to_ordered_mapping();
        let keys: Vec<&str> = mapping.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(t.from_mapping(mapping).unwrap(), r);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Replace
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_replace() {
        let p = point().make([11, 22]).unwrap();
        let q = p.replace([("x", 100)]).unwrap();
        assert_eq!(q.to_string(), "Point(x=100, y=22)");
        assert_eq!(p.to_string(), "Point(x=11, y=22)");
        assert_eq!(p.replace([("y", 22)]).unwrap(), p);
        assert!(matches!(
            p.replace([("x", 1), ("error", 2)]),
            Err(RecordError::UnexpectedField { ref fields, .. }) if fields == &["error"]
        ));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Equality boundary
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_typename_is_part_of_equality() {
        let a = SharedRecordType::new("Point", "x y").unwrap().make([1, 2]).unwrap();
        let b = SharedRecordType::new("Vector", "x y").unwrap().make([1, 2]).unwrap();
        assert_ne!(a, b);
        assert!(a.values_eq(b.as_slice()));
    }

    #[test]
    fn test_field_names_are_part_of_equality() {
        let a = SharedRecordType::new("P", "x y").unwrap().make([1, 2]).unwrap();
        let b = SharedRecordType::new("P", "u v").unwrap().make([1, 2]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_same_shape_from_separate_constructors_is_equal() {
        let a = SharedRecordType::new("Point", "x y").unwrap().make([1, 2]).unwrap();
        let b = SharedRecordType::new("Point", "x y").unwrap().make([1, 2]).unwrap();
        assert_eq!(a, b);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Odd sizes
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_zero_and_one_field() {
        let zero = SharedRecordType::new("Zero", "").unwrap();
        let z = zero.call(Args::new()).unwrap();
        assert_eq!(z.to_string(), "Zero()");
        assert!(z.to_ordered_mapping().is_empty());

        let dot = SharedRecordType::new("Dot", "d").unwrap();
        let d = dot.call(Args::positional([1])).unwrap();
        assert_eq!(d.to_string(), "Dot(d=1)");
        assert_eq!(d.replace([("d", 999)]).unwrap()[0], v(999));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Serialization: shape travels with the values
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_parts_round_trip() {
        let p = point().make([10, 20]).unwrap();
        let (typename, fields, values) = p.clone().into_parts();
        assert_eq!(typename, "Point");
        let q = SharedRecord::from_parts(&typename, fields.to_vec(), values).unwrap();
        assert_eq!(p, q);
    }

    #[test]
    fn test_from_parts_validates() {
        let err = SharedRecord::from_parts("Point", vec!["x".into(), "x".into()], vec![v(1), v(2)]);
        assert!(matches!(err, Err(RecordError::DuplicateField(_))));
        let err = SharedRecord::from_parts("Point", vec!["x".into()], vec![v(1), v(2)]);
        assert!(matches!(err, Err(RecordError::ArityError { .. })));
    }

    #[test]
    fn test_json_round_trip() {
        let t = SharedRecordType::new("TestNT", "x y z").unwrap();
        let p = t.call(Args::new().kw("x", 10).kw("y", 20).kw("z", 30)).unwrap();
        let json = p.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"typename":"TestNT","fields":["x","y","z"],"values":[10,20,30]}"#
        );
        let q = SharedRecord::from_json(&json).unwrap();
        assert_eq!(p, q);
        assert_eq!(p.fields(), q.fields());
        assert_eq!(q.typename(), "TestNT");
    }

    #[test]
    fn test_cbor_round_trip() {
        let t = SharedRecordType::new("TestNT", "x y z").unwrap();
        let p = t
            .make([RecordValue::from("a"), RecordValue::Null, RecordValue::from(false)])
            .unwrap();
        let q = SharedRecord::from_cbor(&p.to_cbor().unwrap()).unwrap();
        assert_eq!(p, q);
    }

    #[test]
    fn test_to_json_refuses_nan() {
        let p = point().make([RecordValue::from(f64::NAN), RecordValue::from(1)]).unwrap();
        assert!(matches!(p.to_json(), Err(RecordError::Serialization(_))));
        assert!(p.to_cbor().is_ok());
    }

    #[test]
    fn test_renamed_shape_json_round_trip() {
        let bad = make_shared_record_type("Bad", ["class", "ok"], true).unwrap();
        let r = bad.make([1, 2]).unwrap();
        let json = r.to_json().unwrap();
        assert_eq!(json, r#"{"typename":"Bad","fields":["_0","ok"],"values":[1,2]}"#);
        let back = SharedRecord::from_json(&json).unwrap();
        assert_eq!(back, r);
        assert_eq!(back.fields(), &["_0", "ok"]);
    }

    #[test]
    fn test_renamed_shape_cbor_round_trip() {
        let bad = make_shared_record_type("Bad", ["class", "ok", "ok"], true).unwrap();
        assert_eq!(bad.fields(), &["_0", "ok", "_2"]);
        let r = bad.make([1, 2, 3]).unwrap();
        let back = SharedRecord::from_cbor(&r.to_cbor().unwrap()).unwrap();
        assert_eq!(back, r);
        assert_eq!(back.field("_2"), Ok(&v(3)));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let json = r#"{"typename":"T","fields":["ok","class"],"values":[1,2]}"#;
        assert!(SharedRecord::from_json(json).is_err());
        let json = r#"{"typename":"T","fields":["a","b"],"values":[1]}"#;
        assert!(SharedRecord::from_json(json).is_err());
        // a placeholder is only valid at its own position
        let json = r#"{"typename":"T","fields":["ok","_0"],"values":[1,2]}"#;
        assert!(SharedRecord::from_json(json).is_err());
    }
}
