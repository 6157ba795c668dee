//! End-to-end rendering tests: diff two values and assert on the exact
//! annotated output. Styles are disabled so the assertions stay readable.

use deepdiff::{DiffError, FormatOptions, UI_ELEMENT_MARKER, diff, diff_and_format, format};
use deepdiff_value::{PropKey, ValueArena, ValueId};
use insta::assert_snapshot;

fn render(arena: &ValueArena, a: ValueId, b: ValueId) -> String {
    let options = FormatOptions::plain().with_omit_annotation_lines(true);
    diff_and_format(arena, a, b, &options).unwrap()
}

#[test]
fn numbers() {
    let mut arena = ValueArena::new();
    let a = arena.number(1.0);
    let b = arena.number(2.0);
    assert_eq!(render(&arena, a, b), "- 1\n+ 2");
}

#[test]
fn negative_zero_and_zero() {
    let mut arena = ValueArena::new();
    let a = arena.number(-0.0);
    let b = arena.number(0.0);
    assert_eq!(render(&arena, a, b), "- -0\n+ 0");
}

#[test]
fn booleans() {
    let mut arena = ValueArena::new();
    let a = arena.bool(false);
    let b = arena.bool(true);
    assert_eq!(render(&arena, a, b), "- false\n+ true");
}

#[test]
fn one_line_strings_render_raw_at_the_root() {
    let mut arena = ValueArena::new();
    let a = arena.string("banana");
    let b = arena.string("apple");
    assert_eq!(render(&arena, a, b), "- banana\n+ apple");
}

#[test]
fn updated_nested_object() {
    let mut arena = ValueArena::new();
    let five = arena.number(5.0);
    let six_a = arena.number(6.0);
    let a_inner = arena.object_from([("c", five), ("d", six_a)]);
    let a_mid = arena.object_from([("b", a_inner)]);
    let a = arena.object_from([("a", a_mid)]);
    let six_b = arena.number(6.0);
    let six_d = arena.number(6.0);
    let b_inner = arena.object_from([("c", six_b), ("d", six_d)]);
    let b_mid = arena.object_from([("b", b_inner)]);
    let b = arena.object_from([("a", b_mid)]);

    assert_snapshot!(render(&arena, a, b), @r#"
  Object {
    "a": Object {
      "b": Object {
-       "c": 5,
+       "c": 6,
        "d": 6,
      },
    },
  }
"#);
}

#[test]
fn property_set_to_undefined_still_shows_up() {
    let mut arena = ValueArena::new();
    let two = arena.number(2.0);
    let undef = arena.undefined();
    let a = arena.object_from([("a", two)]);
    let b = arena.object_from([("a", undef)]);

    assert_snapshot!(render(&arena, a, b), @r#"
  Object {
-   "a": 2,
+   "a": undefined,
  }
"#);
    assert_snapshot!(render(&arena, b, a), @r#"
  Object {
-   "a": undefined,
+   "a": 2,
  }
"#);
}

#[test]
fn one_property_complex_other_primitive() {
    let mut arena = ValueArena::new();
    let two = arena.number(2.0);
    let a = arena.object_from([("a", two)]);
    let three = arena.number(3.0);
    let inner = arena.object_from([("c", three)]);
    let mid = arena.object_from([("b", inner)]);
    let b = arena.object_from([("a", mid)]);

    assert_snapshot!(render(&arena, a, b), @r#"
  Object {
-   "a": 2,
+   "a": Object {
+     "b": Object {
+       "c": 3,
+     },
+   },
  }
"#);
}

#[test]
fn inserted_and_deleted_properties() {
    let mut arena = ValueArena::new();
    let one = arena.number(1.0);
    let a_inner = arena.object_from([("a", one)]);
    let a = arena.object_from([("a", a_inner)]);
    let three = arena.number(3.0);
    let b_leaf = arena.object_from([("c", three)]);
    let b_inner = arena.object_from([("b", b_leaf)]);
    let b = arena.object_from([("b", b_inner)]);

    assert_snapshot!(render(&arena, a, b), @r#"
  Object {
-   "a": Object {
-     "a": 1,
-   },
+   "b": Object {
+     "b": Object {
+       "c": 3,
+     },
+   },
  }
"#);
}

#[test]
fn equal_objects_render_expanded_next_to_changes() {
    let mut arena = ValueArena::new();
    let one_a = arena.number(1.0);
    let a_inner = arena.object_from([("a", one_a)]);
    let a = arena.object_from([("a", a_inner)]);
    let one_b = arena.number(1.0);
    let b_inner = arena.object_from([("a", one_b)]);
    let two = arena.number(2.0);
    let b = arena.object_from([("a", b_inner), ("c", two)]);

    assert_snapshot!(render(&arena, a, b), @r#"
  Object {
    "a": Object {
      "a": 1,
    },
+   "c": 2,
  }
"#);
}

#[test]
fn arrays_mark_the_excess_tail() {
    let mut arena = ValueArena::new();
    let a_items: Vec<_> = [1.0, 4.0, 4.0].iter().map(|n| arena.number(*n)).collect();
    let b_items: Vec<_> = [1.0, 6.0].iter().map(|n| arena.number(*n)).collect();
    let a = arena.array(a_items);
    let b = arena.array(b_items);

    assert_snapshot!(render(&arena, a, b), @r"
  Array [
    1,
-   4,
+   6,
-   4,
  ]
");
}

#[test]
fn objects_nested_in_arrays() {
    let mut arena = ValueArena::new();
    let one_a = arena.number(1.0);
    let three = arena.number(3.0);
    let two_a = arena.number(2.0);
    let twenty = arena.number(20.0);
    let four = arena.number(4.0);
    let a_obj = arena.object_from([("a", three), ("b", two_a), ("c", twenty)]);
    let a = arena.array([one_a, a_obj, four]);
    let one_b = arena.number(1.0);
    let one_obj = arena.number(1.0);
    let two_b = arena.number(2.0);
    let thirty = arena.number(30.0);
    let b_obj = arena.object_from([("a", one_obj), ("b", two_b), ("d", thirty)]);
    let b = arena.array([one_b, b_obj]);

    assert_snapshot!(render(&arena, a, b), @r#"
  Array [
    1,
    Object {
-     "a": 3,
+     "a": 1,
      "b": 2,
-     "c": 20,
+     "d": 30,
    },
-   4,
  ]
"#);
}

#[test]
fn arrays_nested_in_arrays() {
    let mut arena = ValueArena::new();
    let one_a = arena.number(1.0);
    let inner_a_items: Vec<_> = [1.0, 3.0, 3.0].iter().map(|n| arena.number(*n)).collect();
    let inner_a = arena.array(inner_a_items);
    let four = arena.number(4.0);
    let a = arena.array([one_a, inner_a, four]);
    let one_b = arena.number(1.0);
    let inner_b_items: Vec<_> = [1.0, 4.0].iter().map(|n| arena.number(*n)).collect();
    let inner_b = arena.array(inner_b_items);
    let b = arena.array([one_b, inner_b]);

    assert_snapshot!(render(&arena, a, b), @r"
  Array [
    1,
    Array [
      1,
-     3,
+     4,
-     3,
    ],
-   4,
  ]
");
}

#[test]
fn inserted_nested_object_renders_as_one_block() {
    let mut arena = ValueArena::new();
    let one_a = arena.number(1.0);
    let a = arena.array([one_a]);
    let one_b = arena.number(1.0);
    let one_prop = arena.number(1.0);
    let two = arena.number(2.0);
    let thirty = arena.number(30.0);
    let obj = arena.object_from([("a", one_prop), ("b", two), ("d", thirty)]);
    let b = arena.array([one_b, obj]);

    assert_snapshot!(render(&arena, a, b), @r#"
  Array [
    1,
+   Object {
+     "a": 1,
+     "b": 2,
+     "d": 30,
+   },
  ]
"#);
    assert_snapshot!(render(&arena, b, a), @r#"
  Array [
    1,
-   Object {
-     "a": 1,
-     "b": 2,
-     "d": 30,
-   },
  ]
"#);
}

#[test]
fn multiline_strings_diff_by_line() {
    let mut arena = ValueArena::new();
    let a = arena.string("line 1\nline 2\nline 3\nline 4");
    let b = arena.string("line 1\nline  2\nline 3\nline 4");

    assert_snapshot!(render(&arena, a, b), @r"
  line 1
- line 2
+ line  2
  line 3
  line 4
");
}

#[test]
fn multiline_change_blocks_keep_deletions_before_insertions() {
    let mut arena = ValueArena::new();
    let a = arena.string(
        "Options:\n--help, -h  Show help                            [boolean]\n--bail, -b  Exit the test suite immediately upon the first\n            failing test.                        [boolean]",
    );
    let b = arena.string(
        "Options:\n  --help, -h  Show help                            [boolean]\n  --bail, -b  Exit the test suite immediately upon the first\n              failing test.                        [boolean]",
    );

    assert_snapshot!(render(&arena, a, b), @r"
  Options:
- --help, -h  Show help                            [boolean]
- --bail, -b  Exit the test suite immediately upon the first
-             failing test.                        [boolean]
+   --help, -h  Show help                            [boolean]
+   --bail, -b  Exit the test suite immediately upon the first
+               failing test.                        [boolean]
");
}

#[test]
fn multiline_string_as_object_property_gets_quoted_ends() {
    let mut arena = ValueArena::new();
    let id_a = arena.string("J");
    let points_a = arena.string("0.5,0.460\n0.25,0.875");
    let a = arena.object_from([("id", id_a), ("points", points_a)]);
    let id_b = arena.string("J");
    let points_b = arena.string("0.5,0.460\n0.5,0.460\n0.25,0.875");
    let b = arena.object_from([("id", id_b), ("points", points_b)]);

    assert_snapshot!(render(&arena, a, b), @r#"
  Object {
    "id": "J",
+   "points": "0.5,0.460
    0.5,0.460
    0.25,0.875",
  }
"#);
}

#[test]
fn equal_root_prints_the_no_difference_message() {
    let mut arena = ValueArena::new();
    let one = arena.number(1.0);
    let a = arena.object_from([("a", one)]);
    let node = diff(&arena, a, a).unwrap();
    let rendered = format(&arena, &node, &FormatOptions::plain()).unwrap();
    assert_eq!(rendered, "Compared values have no visual difference.");
}

#[test]
fn unequal_type_root_prints_both_kinds() {
    let mut arena = ValueArena::new();
    let a = arena.number(1.0);
    let b = arena.string("a");
    let node = diff(&arena, a, b).unwrap();
    let rendered = format(&arena, &node, &FormatOptions::plain()).unwrap();
    assert_eq!(
        rendered,
        "  Comparing two different types of values. Expected number but received string."
    );
}

#[test]
fn annotation_legend_precedes_the_lines() {
    let mut arena = ValueArena::new();
    let a = arena.number(1.0);
    let b = arena.number(2.0);
    let node = diff(&arena, a, b).unwrap();
    let rendered = format(&arena, &node, &FormatOptions::plain()).unwrap();
    assert_eq!(rendered, "- Expected\n+ Received\n\n- 1\n+ 2");
}

#[test]
fn equal_map_serializes_inline_next_to_changes() {
    let mut arena = ValueArena::new();
    let key = arena.string("a");
    let one = arena.number(1.0);
    let map = arena.map_from([(key, one)]);
    let x_a = arena.number(1.0);
    let x_b = arena.number(2.0);
    let a = arena.object_from([("m", map), ("x", x_a)]);
    let b = arena.object_from([("m", map), ("x", x_b)]);

    assert_snapshot!(render(&arena, a, b), @r#"
  Object {
    "m": Map {
      "a" => 1,
    },
-   "x": 1,
+   "x": 2,
  }
"#);
}

#[test]
fn formatting_an_updated_map_is_unimplemented() {
    let mut arena = ValueArena::new();
    let key = arena.string("a");
    let one = arena.number(1.0);
    let two = arena.number(2.0);
    let a = arena.map_from([(key, one)]);
    let b = arena.map_from([(key, two)]);

    let options = FormatOptions::plain().with_omit_annotation_lines(true);
    assert!(matches!(
        diff_and_format(&arena, a, b, &options),
        Err(DiffError::UnimplementedFormat { .. })
    ));
}

#[test]
fn cycles_render_circular_markers() {
    let mut arena = ValueArena::new();
    // a.x.y = a; b.x.y = b.x: both sides cycle, to different depths.
    let a = arena.object();
    let ax = arena.object_from([("y", a)]);
    arena.set_prop(a, "x", ax);
    let b = arena.object();
    let bx = arena.object();
    arena.set_prop(bx, "y", bx);
    arena.set_prop(b, "x", bx);

    assert_snapshot!(render(&arena, a, b), @r#"
  Object {
    "x": Object {
-     "y": [Circular],
+     "y": [Circular],
    },
  }
"#);
}

fn ui_element(
    arena: &mut ValueArena,
    type_name: &str,
    props: ValueId,
    children: ValueId,
) -> ValueId {
    let marker = arena.bool(true);
    let type_value = arena.string(type_name);
    let el = arena.object_from([("type", type_value), ("props", props), ("children", children)]);
    arena.set_hidden_prop(el, PropKey::Symbol(UI_ELEMENT_MARKER.into()), marker);
    el
}

#[test]
fn updated_ui_elements_render_their_changed_props() {
    let mut arena = ValueArena::new();
    let one = arena.number(1.0);
    let two = arena.number(2.0);
    let a_props = arena.object_from([("size", one)]);
    let b_props = arena.object_from([("size", two)]);
    let children = arena.array([]);
    let a = ui_element(&mut arena, "Button", a_props, children);
    let b = ui_element(&mut arena, "Button", b_props, children);

    assert_snapshot!(render(&arena, a, b), @r#"
  <Button
    "props": Object {
-     "size": 1,
+     "size": 2,
    },
    "children": Array [],
  />
"#);
}

#[test]
fn one_sided_ui_elements_render_as_tags() {
    let mut arena = ValueArena::new();
    let props = arena.object();
    let children = arena.array([]);
    let el = ui_element(&mut arena, "Button", props, children);
    let one = arena.number(1.0);
    let a = arena.object_from([("el", el), ("x", one)]);
    let b = arena.object_from([("x", one)]);

    assert_snapshot!(render(&arena, a, b), @r#"
  Object {
-   "el": <Button />,
    "x": 1,
  }
"#);
}

#[test]
fn one_sided_circularity_against_a_primitive() {
    let mut arena = ValueArena::new();
    let a = arena.object();
    let ax = arena.object_from([("y", a)]);
    arena.set_prop(a, "x", ax);
    let three = arena.number(3.0);
    let by = arena.object_from([("y", three)]);
    let b = arena.object_from([("x", by)]);

    assert_snapshot!(render(&arena, a, b), @r#"
  Object {
    "x": Object {
-     "y": Object {
-       "x": Object {
-         "y": [Circular],
-       },
-     },
+     "y": 3,
    },
  }
"#);
}
