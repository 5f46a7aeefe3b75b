// src/core/display/renderer.rs
use crate::core::metaprogram::Metaprogram;
use super::call_graph::CallGraphNode;
use super::wrap::{wrap, BRANCH, CLOSED_LEVEL, LAST_BRANCH, OPEN_LEVEL};

/// Draws a pre-order call graph as an ASCII tree, wrapped to a terminal width
#[derive(Debug, Clone, Copy)]
pub struct CallGraphRenderer {
    width: usize,
}

impl CallGraphRenderer {
    /// A width of 0 or 1 turns wrapping off
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn render_metaprogram(&self, metaprogram: &Metaprogram) -> Vec<String> {
        self.render(&metaprogram.call_graph())
    }

    pub fn render(&self, nodes: &[CallGraphNode<'_>]) -> Vec<String> {
        // remaining[k]: children of the open node at depth k not yet drawn
        let mut remaining: Vec<usize> = Vec::new();
        let mut lines = Vec::new();

        for node in nodes {
            let depth = node.depth;
            remaining.resize(depth, 0);

            let connector = if depth == 0 {
                ""
            } else {
                let siblings_left = &mut remaining[depth - 1];
                *siblings_left = siblings_left.saturating_sub(1);
                if *siblings_left > 0 {
                    BRANCH
                } else {
                    LAST_BRANCH
                }
            };

            let prefix: String = remaining
                .iter()
                .take(depth.saturating_sub(1))
                .map(|left| if *left > 0 { OPEN_LEVEL } else { CLOSED_LEVEL })
                .collect();

            lines.extend(wrap(&prefix, connector, &node.content(), self.width));
            remaining.push(node.children);
        }

        lines
    }
}

/// Render a metaprogram at the given width
pub fn render(metaprogram: &Metaprogram, width: usize) -> Vec<String> {
    CallGraphRenderer::new(width).render_metaprogram(metaprogram)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::metaprogram::{build, SourceLocation};
    use crate::core::trace::{DecodedEvent, InstantiationKind};
    use crate::core::trace::InstantiationKind::*;

    fn fib5_call_graph() -> Vec<CallGraphNode<'static>> {
        vec![
            CallGraphNode::root("int_<fib<5>::value>", 3),
            CallGraphNode::new("fib<5>", TemplateInstantiation, 1, 2),
            CallGraphNode::new("fib<3>", TemplateInstantiation, 2, 2),
            CallGraphNode::new("fib<1>", Memoization, 3, 0),
            CallGraphNode::new("fib<2>", TemplateInstantiation, 3, 2),
            CallGraphNode::new("fib<0>", Memoization, 4, 0),
            CallGraphNode::new("fib<1>", Memoization, 4, 0),
            CallGraphNode::new("fib<4>", TemplateInstantiation, 2, 2),
            CallGraphNode::new("fib<2>", Memoization, 3, 0),
            CallGraphNode::new("fib<3>", Memoization, 3, 0),
            CallGraphNode::new("fib<5>", Memoization, 1, 0),
            CallGraphNode::new("int_<5>", TemplateInstantiation, 1, 0),
        ]
    }

    const UNWRAPPED: &str = "\
int_<fib<5>::value>
+ fib<5> (TemplateInstantiation)
| + fib<3> (TemplateInstantiation)
| | + fib<1> (Memoization)
| | ` fib<2> (TemplateInstantiation)
| |   + fib<0> (Memoization)
| |   ` fib<1> (Memoization)
| ` fib<4> (TemplateInstantiation)
|   + fib<2> (Memoization)
|   ` fib<3> (Memoization)
+ fib<5> (Memoization)
` int_<5> (TemplateInstantiation)
";

    fn joined(lines: Vec<String>) -> String {
        lines.into_iter().map(|line| line + "\n").collect()
    }

    #[test]
    fn test_forwardtrace_on_narrow_terminal() {
        let rendered = joined(CallGraphRenderer::new(25).render(&fib5_call_graph()));

        assert_eq!(
            rendered,
            "int_<fib<5>::value>\n\
             + fib<5> (TemplateInstant\n\
             | iation)\n\
             | + fib<3> (TemplateInsta\n\
             | | ntiation)\n\
             | | + fib<1> (Memoization\n\
             | | | )\n\
             | | ` fib<2> (TemplateIns\n\
             | |   tantiation)\n\
             | |   + fib<0> (Memoizati\n\
             | |   | on)\n\
             | |   ` fib<1> (Memoizati\n\
             | |     on)\n\
             | ` fib<4> (TemplateInsta\n\
             |   ntiation)\n\
             |   + fib<2> (Memoization\n\
             |   | )\n\
             |   ` fib<3> (Memoization\n\
             |     )\n\
             + fib<5> (Memoization)\n\
             ` int_<5> (TemplateInstan\n  \
             tiation)\n"
        );
    }

    #[test]
    fn test_forwardtrace_on_extremely_narrow_terminal_w0() {
        let rendered = joined(CallGraphRenderer::new(0).render(&fib5_call_graph()));
        assert_eq!(rendered, UNWRAPPED);
    }

    #[test]
    fn test_forwardtrace_on_extremely_narrow_terminal_w1() {
        let rendered = joined(CallGraphRenderer::new(1).render(&fib5_call_graph()));
        assert_eq!(rendered, UNWRAPPED);
    }

    #[test]
    fn test_wide_terminal_matches_unwrapped() {
        let rendered = joined(CallGraphRenderer::new(200).render(&fib5_call_graph()));
        assert_eq!(rendered, UNWRAPPED);
    }

    #[test]
    fn test_renders_built_metaprogram() {
        let begin = |kind, name: &str| DecodedEvent::Begin {
            kind,
            name: name.to_string(),
            location: SourceLocation::new(Arc::from("fib.cpp"), 1, None),
        };

        // fib<5> expands fib<3> and fib<4>, each reusing memoized results
        let events = vec![
            begin(TemplateInstantiation, "fib<5>"),
            begin(TemplateInstantiation, "fib<3>"),
            begin(Memoization, "fib<1>"),
            DecodedEvent::End,
            begin(TemplateInstantiation, "fib<2>"),
            begin(Memoization, "fib<0>"),
            DecodedEvent::End,
            begin(Memoization, "fib<1>"),
            DecodedEvent::End,
            DecodedEvent::End,
            DecodedEvent::End,
            begin(TemplateInstantiation, "fib<4>"),
            begin(Memoization, "fib<2>"),
            DecodedEvent::End,
            begin(Memoization, "fib<3>"),
            DecodedEvent::End,
            DecodedEvent::End,
            DecodedEvent::End,
            begin(Memoization, "fib<5>"),
            DecodedEvent::End,
            begin(TemplateInstantiation, "int_<5>"),
            DecodedEvent::End,
        ];
        let mp = build(events, true, "int_<fib<5>::value>", "int_<5>").unwrap();

        fn shape(nodes: &[CallGraphNode<'_>]) -> Vec<(String, Option<InstantiationKind>, usize, usize)> {
            nodes
                .iter()
                .map(|n| (n.name.to_string(), n.kind, n.depth, n.children))
                .collect()
        }
        assert_eq!(shape(&mp.call_graph()), shape(&fib5_call_graph()));
        assert_eq!(joined(render(&mp, 0)), UNWRAPPED);
    }

    #[test]
    fn test_root_only() {
        let lines = CallGraphRenderer::new(80).render(&[CallGraphNode::root("int", 0)]);
        assert_eq!(lines, vec!["int"]);
    }

    #[test]
    fn test_empty_graph_renders_nothing() {
        assert!(CallGraphRenderer::new(80).render(&[]).is_empty());
    }
}
