use std::cell::RefCell;

use scpi_core::Node;
use scpi_macros::scpi_tree;

thread_local! {
    /// Recorder the handler functions append to, drained by each test.
    static CALLS: RefCell<Vec<(&'static str, bool, String)>> = RefCell::new(Vec::new());
}

fn record(name: &'static str, is_query: bool, parameter: &str) {
    CALLS.with(|calls| {
        calls
            .borrow_mut()
            .push((name, is_query, String::from(parameter)));
    });
}

fn take_calls() -> Vec<(&'static str, bool, String)> {
    CALLS.with(|calls| calls.borrow_mut().drain(..).collect())
}

mod handlers {
    pub fn voltage(is_query: bool, parameter: &str) {
        super::record("voltage", is_query, parameter);
    }

    pub fn current(is_query: bool, parameter: &str) {
        super::record("current", is_query, parameter);
    }
}

fn demo_tree() -> Node {
    scpi_tree! {
        SENSor {
            [POWer] {
                CURRent => handlers::current,
                VOLTage => handlers::voltage,
            }
        }
    }
}

// ==================== MACRO EXPANSION TESTS ====================

#[test]
fn test_declared_tree_mirrors_the_notation() {
    let tree = demo_tree();

    assert_eq!(tree.keyword(), "SENSor");
    assert!(!tree.is_optional());
    assert_eq!(tree.children().len(), 1);

    let power = &tree.children()[0];
    assert!(power.is_optional());
    assert!(!power.has_handler());
    assert_eq!(power.children().len(), 2);
    assert!(power.children()[0].has_handler());

    assert_eq!(
        tree.paths(),
        [
            "SENSor",
            "SENSor:[POWer]",
            "SENSor:[POWer]:CURRent",
            "SENSor:[POWer]:VOLTage",
        ]
    );
}

#[test]
fn test_declared_tree_resolves_like_a_hand_built_one() {
    let declared = demo_tree();
    let built = Node::new("SENSor").child(
        Node::new("POWer")
            .optional()
            .child(Node::new("CURRent").handler(handlers::current))
            .child(Node::new("VOLTage").handler(handlers::voltage)),
    );
    let _ = take_calls();

    for input in ["SENS:VOLT 1", "SENS:CURR?", "SENSO:VOLT", "SENS:POW", ""] {
        let declared_leaf = declared.match_segment(input).map(|r| r.leaf.keyword());
        let built_leaf = built.match_segment(input).map(|r| r.leaf.keyword());
        assert_eq!(declared_leaf, built_leaf, "input: {}", input);
    }
    let _ = take_calls();
}

// ==================== DISPATCH TESTS ====================

#[test]
fn test_sequence_dispatches_in_textual_order() {
    let tree = demo_tree();
    let _ = take_calls();

    tree.parse("sEnS:voltage 100V;sEnS:current 0.2ma");
    assert_eq!(
        take_calls(),
        [
            ("voltage", false, String::from("100V")),
            ("current", false, String::from("0.2ma")),
        ]
    );
}

#[test]
fn test_abbreviation_case_and_optional_level_equivalence() {
    let tree = demo_tree();
    let _ = take_calls();

    for input in ["sEnS:voltage", "sEnSor:PoW:voltage", "SENSOR:PoWer:voltage"] {
        let result = tree.match_segment(input).expect(input);
        assert_eq!(result.leaf.keyword(), "VOLTage");
    }
    assert_eq!(take_calls().len(), 3);
}

#[test]
fn test_queries_and_parameters_reach_the_handlers() {
    let tree = demo_tree();
    let _ = take_calls();

    tree.parse("SENS:VOLT 5V;SENS:VOLT?;SENS:CURR 1mA");
    assert_eq!(
        take_calls(),
        [
            ("voltage", false, String::from("5V")),
            ("voltage", true, String::new()),
            ("current", false, String::from("1mA")),
        ]
    );
}

#[test]
fn test_unresolved_commands_fire_nothing() {
    let tree = demo_tree();
    let _ = take_calls();

    assert!(tree.match_segment("SENS:FREQ 10MHz").is_none());
    tree.parse("TRIG:SOUR BUS;;SENS:RES?");
    assert!(take_calls().is_empty());
}
