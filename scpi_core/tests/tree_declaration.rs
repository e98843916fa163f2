use scpi_macros::scpi_tree;

mod handlers {
    pub fn system(_is_query: bool, _parameter: &str) {}
    pub fn version(_is_query: bool, _parameter: &str) {}
}

// ==================== DECLARATION SHAPE TESTS ====================

#[test]
fn test_leaves_need_no_braces() {
    let tree = scpi_tree! {
        SYSTem {
            VERSion,
            ERRor,
        }
    };

    assert_eq!(tree.paths(), ["SYSTem", "SYSTem:VERSion", "SYSTem:ERRor"]);
}

#[test]
fn test_trailing_commas_and_empty_bodies_are_accepted() {
    let tree = scpi_tree! {
        STATus {
            OPERation {},
            QUEStionable,
        }
    };

    assert_eq!(
        tree.paths(),
        ["STATus", "STATus:OPERation", "STATus:QUEStionable"]
    );
}

#[test]
fn test_handler_on_a_level_with_children() {
    let tree = scpi_tree! {
        SYSTem => handlers::system {
            VERSion => handlers::version
        }
    };

    assert!(tree.has_handler());
    assert!(tree.children()[0].has_handler());
    assert_eq!(tree.match_segment("SYST").unwrap().leaf.keyword(), "SYSTem");
    assert_eq!(
        tree.match_segment("SYST:VERS").unwrap().leaf.keyword(),
        "VERSion"
    );
}

#[test]
fn test_nested_optional_levels_may_each_be_skipped() {
    let tree = scpi_tree! {
        INSTrument {
            [SELect] {
                [CHANnel] {
                    NAME
                }
            }
        }
    };

    for input in [
        "INST:NAME",
        "INST:SEL:NAME",
        "INST:CHAN:NAME",
        "INST:SEL:CHAN:NAME",
        "INSTRUMENT:SELECT:CHANNEL:NAME",
    ] {
        let result = tree.match_segment(input).expect(input);
        assert_eq!(result.leaf.keyword(), "NAME", "input: {}", input);
    }
}
