use crate::{BuiltinType, Bound, MaxElements, OrderedBy, Position, Status};

#[test]
fn position_display() {
    assert_eq!(Position::new(3, 14).to_string(), "3:14");
    assert!(Position::new(2, 40) < Position::new(3, 1));
}

#[test]
fn status_keywords() {
    assert_eq!(Status::from_keyword("deprecated"), Some(Status::Deprecated));
    assert_eq!(Status::from_keyword("Current"), None);
    assert_eq!(Status::Obsolete.as_str(), "obsolete");
}

#[test]
fn ordered_by_keywords() {
    assert_eq!(OrderedBy::from_keyword("user"), Some(OrderedBy::User));
    assert_eq!(OrderedBy::from_keyword("any"), None);
}

#[test]
fn max_elements_admits() {
    assert!(MaxElements::Unbounded.admits(u64::MAX));
    assert!(MaxElements::Bounded(3).admits(3));
    assert!(!MaxElements::Bounded(3).admits(4));
}

#[test]
fn builtin_names_round_trip() {
    for ty in BuiltinType::ALL {
        assert_eq!(BuiltinType::from_name(ty.name()), Some(ty));
    }
    assert_eq!(BuiltinType::from_name("int128"), None);
    assert_eq!(
        BuiltinType::from_name("instance-identifier"),
        Some(BuiltinType::InstanceIdentifier)
    );
}

#[test]
fn builtin_restriction_applicability() {
    assert!(BuiltinType::Uint8.supports_range());
    assert!(BuiltinType::Decimal64.supports_range());
    assert!(!BuiltinType::String.supports_range());
    assert!(BuiltinType::Binary.supports_length());
    assert!(!BuiltinType::Binary.supports_pattern());
    assert!(BuiltinType::String.supports_pattern());
    assert!(BuiltinType::Union.is_anonymous_container());
}

#[test]
fn natural_ranges() {
    let uint8 = BuiltinType::Uint8.natural_range(None).unwrap();
    assert_eq!(uint8.lowest(), Some(Bound::Int(0)));
    assert_eq!(uint8.highest(), Some(Bound::Int(255)));
    assert!(BuiltinType::String.natural_range(None).is_none());

    let dec = BuiltinType::Decimal64.natural_range(Some(2)).unwrap();
    assert!(matches!(dec.highest(), Some(Bound::Decimal(v)) if v > 9.2e16 && v < 9.3e16));
}

#[test]
fn builtin_serializes_kebab_case() {
    let json = serde_json::to_string(&BuiltinType::InstanceIdentifier).unwrap();
    assert_eq!(json, "\"instance-identifier\"");
}
