//! Sample flowchart rendered as inline SVG.

use dioxus::prelude::*;

/// One box of the flowchart.
struct Node {
    x: f64,
    y: f64,
    label: &'static str,
}

const NODE_WIDTH: f64 = 140.0;
const NODE_HEIGHT: f64 = 48.0;

const NODES: [Node; 4] = [
    Node {
        x: 30.0,
        y: 36.0,
        label: "Início",
    },
    Node {
        x: 230.0,
        y: 36.0,
        label: "Editar diagrama",
    },
    Node {
        x: 430.0,
        y: 36.0,
        label: "Exportar",
    },
    Node {
        x: 430.0,
        y: 156.0,
        label: "Compartilhar",
    },
];

/// `(from, to)` indices into [`NODES`].
const EDGES: [(usize, usize); 3] = [(0, 1), (1, 2), (2, 3)];

/// Connector path between two nodes: right edge to left edge on the
/// same row, bottom edge to top edge otherwise.
fn edge_path(from: &Node, to: &Node) -> String {
    if (from.y - to.y).abs() < f64::EPSILON {
        let y = from.y + NODE_HEIGHT / 2.0;
        format!("M{:.1},{y:.1} L{:.1},{y:.1}", from.x + NODE_WIDTH, to.x)
    } else {
        let x = from.x + NODE_WIDTH / 2.0;
        format!("M{x:.1},{:.1} L{x:.1},{:.1}", from.y + NODE_HEIGHT, to.y)
    }
}

/// Props for the [`Diagram`] component.
#[derive(Props, Clone, PartialEq)]
pub struct DiagramProps {
    /// Receives the `<svg>` element once it is in the DOM.
    on_mounted: EventHandler<web_sys::Element>,
}

/// The diagram the export dialog captures.
#[component]
pub fn Diagram(props: DiagramProps) -> Element {
    let on_mounted = props.on_mounted;

    rsx! {
        svg {
            id: "diagram-ref",
            xmlns: "http://www.w3.org/2000/svg",
            view_box: "0 0 600 240",
            width: "600",
            height: "240",
            class: "diagram",
            onmounted: move |evt| {
                match evt.data().downcast::<web_sys::Element>() {
                    Some(element) => on_mounted.call(element.clone()),
                    None => tracing::warn!("diagram mounted without a DOM element"),
                }
            },

            defs {
                marker {
                    id: "arrow",
                    view_box: "0 0 10 10",
                    "refX": "10",
                    "refY": "5",
                    "markerWidth": "8",
                    "markerHeight": "8",
                    orient: "auto-start-reverse",
                    path { d: "M0,0 L10,5 L0,10 z", fill: "#4a4a4a" }
                }
            }

            for (from, to) in EDGES {
                path {
                    d: edge_path(&NODES[from], &NODES[to]),
                    stroke: "#4a4a4a",
                    stroke_width: "2",
                    fill: "none",
                    marker_end: "url(#arrow)",
                }
            }

            for node in NODES.iter() {
                g {
                    rect {
                        x: "{node.x}",
                        y: "{node.y}",
                        width: "{NODE_WIDTH}",
                        height: "{NODE_HEIGHT}",
                        rx: "8",
                        fill: "#1273DE",
                    }
                    text {
                        x: "{node.x + NODE_WIDTH / 2.0}",
                        y: "{node.y + NODE_HEIGHT / 2.0}",
                        fill: "#ffffff",
                        font_family: "sans-serif",
                        font_size: "14",
                        text_anchor: "middle",
                        dominant_baseline: "middle",
                        "{node.label}"
                    }
                }
            }
        }
    }
}
