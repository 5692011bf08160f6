//! Generic tree traversal over parsed document values.
//!
//! Visits every leaf (non-container) value exactly once, depth-first in
//! document order, handing the visitor the leaf, its path from the root and
//! its immediately enclosing container. `serde_yaml::Value` trees are acyclic
//! by construction, so recursion is bounded by document nesting depth.

use serde_yaml::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Key(k) => write!(f, "{}", k),
            Segment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

/// Render a path as `spec.tasks[0].params[1].value`.
pub fn path_to_string(path: &[Segment]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            Segment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            Segment::Index(idx) => {
                out.push('[');
                out.push_str(&idx.to_string());
                out.push(']');
            }
        }
    }
    out
}

/// Walk `root`, invoking `visit(leaf, path, parent)` for every leaf value.
/// For a scalar root the root itself is passed as its own parent.
pub fn walk<'a, F>(root: &'a Value, visit: &mut F)
where
    F: FnMut(&'a Value, &[Segment], &'a Value),
{
    let mut path = Vec::new();
    recurse(root, root, &mut path, visit);
}

fn recurse<'a, F>(value: &'a Value, parent: &'a Value, path: &mut Vec<Segment>, visit: &mut F)
where
    F: FnMut(&'a Value, &[Segment], &'a Value),
{
    match value {
        Value::Mapping(map) => {
            for (key, child) in map {
                let key = match key {
                    Value::String(s) => s.clone(),
                    other => serde_yaml::to_string(other)
                        .unwrap_or_default()
                        .trim_end()
                        .to_string(),
                };
                path.push(Segment::Key(key));
                recurse(child, value, path, visit);
                path.pop();
            }
        }
        Value::Sequence(seq) => {
            for (idx, child) in seq.iter().enumerate() {
                path.push(Segment::Index(idx));
                recurse(child, value, path, visit);
                path.pop();
            }
        }
        Value::Tagged(tagged) => recurse(&tagged.value, parent, path, visit),
        leaf => visit(leaf, path, parent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn visits_every_leaf_exactly_once() {
        let root = doc(
            "spec:\n  tasks:\n    - name: build\n      params:\n        - name: tag\n          value: v1\n  count: 3\n",
        );
        let mut seen = Vec::new();
        walk(&root, &mut |value, path, _parent| {
            seen.push((path_to_string(path), value.clone()));
        });

        assert_eq!(seen.len(), 4);
        assert!(seen.contains(&(
            "spec.tasks[0].params[0].value".to_string(),
            Value::String("v1".into())
        )));
        assert!(seen.contains(&("spec.count".to_string(), doc("3"))));
    }

    #[test]
    fn paths_resolve_back_to_their_leaf() {
        let root = doc("a:\n  - b: 1\n  - c: [x, y]\n");
        walk(&root, &mut |value, path, _parent| {
            let mut cursor = &root;
            for segment in path {
                cursor = match segment {
                    Segment::Key(k) => &cursor[k.as_str()],
                    Segment::Index(i) => &cursor[*i],
                };
            }
            assert_eq!(cursor, value);
        });
    }

    #[test]
    fn parent_is_enclosing_container() {
        let root = doc("outer:\n  inner: leaf\n");
        let mut checked = false;
        walk(&root, &mut |value, _path, parent| {
            assert_eq!(value, &Value::String("leaf".into()));
            assert_eq!(parent, &root["outer"]);
            checked = true;
        });
        assert!(checked);
    }

    #[test]
    fn scalar_root_is_its_own_parent() {
        let root = Value::String("solo".into());
        let mut count = 0;
        walk(&root, &mut |value, path, parent| {
            assert!(path.is_empty());
            assert_eq!(value, parent);
            count += 1;
        });
        assert_eq!(count, 1);
    }
}
