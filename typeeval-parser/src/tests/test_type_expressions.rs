use crate::*;

#[test]
fn test_parse_bare_name() {
    let result = parse_type_expr("Foo").unwrap();

    match &result.kind {
        TypeExprKind::Name(name) => {
            assert_eq!(name.name, "Foo");
        }
        _ => panic!("Expected name node"),
    }
}

#[test]
fn test_parse_dotted_name() {
    let result = parse_type_expr("collections.abc.Sequence").unwrap();

    match &result.kind {
        TypeExprKind::Name(name) => {
            assert_eq!(name.name, "collections.abc.Sequence");
        }
        _ => panic!("Expected name node"),
    }
}

#[test]
fn test_parse_none_literal() {
    let result = parse_type_expr("None").unwrap();

    assert_eq!(result.kind, TypeExprKind::NoneLiteral);
}

#[test]
fn test_none_prefix_is_a_name() {
    // NoneType starts with the None token but must parse as a plain name
    let result = parse_type_expr("NoneType").unwrap();

    match &result.kind {
        TypeExprKind::Name(name) => {
            assert_eq!(name.name, "NoneType");
        }
        _ => panic!("Expected name node"),
    }
}

#[test]
fn test_this_parses_as_plain_name() {
    // This is disambiguated during resolution, never by the parser
    let result = parse_type_expr("This").unwrap();

    match &result.kind {
        TypeExprKind::Name(name) => {
            assert_eq!(name.name, "This");
        }
        _ => panic!("Expected name node"),
    }
}

#[test]
fn test_parse_application() {
    let result = parse_type_expr("Foo[Bar, None]").unwrap();

    match &result.kind {
        TypeExprKind::Application { base, args } => {
            match &base.kind {
                TypeExprKind::Name(name) => assert_eq!(name.name, "Foo"),
                _ => panic!("Expected name base"),
            }
            assert_eq!(args.len(), 2);
            match &args[0].kind {
                TypeExprKind::Name(name) => assert_eq!(name.name, "Bar"),
                _ => panic!("Expected name argument"),
            }
            assert_eq!(args[1].kind, TypeExprKind::NoneLiteral);
        }
        _ => panic!("Expected application node"),
    }
}

#[test]
fn test_parse_nested_application() {
    let result = parse_type_expr("Dict[str, List[int]]").unwrap();

    match &result.kind {
        TypeExprKind::Application { base, args } => {
            match &base.kind {
                TypeExprKind::Name(name) => assert_eq!(name.name, "Dict"),
                _ => panic!("Expected name base"),
            }
            assert_eq!(args.len(), 2);
            match &args[1].kind {
                TypeExprKind::Application { base, args } => {
                    match &base.kind {
                        TypeExprKind::Name(name) => assert_eq!(name.name, "List"),
                        _ => panic!("Expected name base"),
                    }
                    assert_eq!(args.len(), 1);
                }
                _ => panic!("Expected nested application"),
            }
        }
        _ => panic!("Expected application node"),
    }
}

#[test]
fn test_parse_chained_subscripts() {
    let result = parse_type_expr("Foo[int][str]").unwrap();

    match &result.kind {
        TypeExprKind::Application { base, args } => {
            assert_eq!(args.len(), 1);
            match &base.kind {
                TypeExprKind::Application { base, args } => {
                    match &base.kind {
                        TypeExprKind::Name(name) => assert_eq!(name.name, "Foo"),
                        _ => panic!("Expected name at the root"),
                    }
                    assert_eq!(args.len(), 1);
                }
                _ => panic!("Expected inner application"),
            }
        }
        _ => panic!("Expected application node"),
    }
}

#[test]
fn test_parse_union() {
    let result = parse_type_expr("int | str | None").unwrap();

    match &result.kind {
        TypeExprKind::Union { members } => {
            assert_eq!(members.len(), 3);
            assert_eq!(members[2].kind, TypeExprKind::NoneLiteral);
        }
        _ => panic!("Expected union node"),
    }
}

#[test]
fn test_parse_union_inside_application() {
    let result = parse_type_expr("List[int | str]").unwrap();

    match &result.kind {
        TypeExprKind::Application { args, .. } => {
            assert_eq!(args.len(), 1);
            match &args[0].kind {
                TypeExprKind::Union { members } => assert_eq!(members.len(), 2),
                _ => panic!("Expected union argument"),
            }
        }
        _ => panic!("Expected application node"),
    }
}

#[test]
fn test_parse_parenthesized_union_base() {
    let result = parse_type_expr("(A | B)[int]").unwrap();

    match &result.kind {
        TypeExprKind::Application { base, args } => {
            assert_eq!(args.len(), 1);
            match &base.kind {
                TypeExprKind::Union { members } => assert_eq!(members.len(), 2),
                _ => panic!("Expected union base"),
            }
        }
        _ => panic!("Expected application node"),
    }
}

#[test]
fn test_trailing_comma_in_subscript() {
    let result = parse_type_expr("Foo[int, str,]").unwrap();

    match &result.kind {
        TypeExprKind::Application { args, .. } => {
            assert_eq!(args.len(), 2);
        }
        _ => panic!("Expected application node"),
    }
}

#[test]
fn test_spans_cover_input() {
    let input = "Foo[Bar, None]";
    let result = parse_type_expr(input).unwrap();

    assert_eq!(result.span.start, 0);
    assert_eq!(result.span.end, input.len());
}

#[test]
fn test_parsing_is_deterministic() {
    let input = "Dict[str, List[int | None]]";
    let first = parse_type_expr(input).unwrap();
    let second = parse_type_expr(input).unwrap();

    assert_eq!(first, second);
}
