use glam::{dvec2, DVec2};

use crate::render::{Fragment, RenderTree, Style};

/// Spacing and scaling used by the layout, in em.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub char_width: f64,
    pub char_height: f64,
    pub char_depth: f64,
    pub empty_width: f64,
    pub binop_space: f64,
    pub bracket_width: f64,
    pub bracket_jut: f64,
    pub bracket_padding: f64,
    pub script_lower_scale: f64,
    pub script_upper_scale: f64,
    pub script_middle: f64,
    pub radical_width: f64,
    pub radical_inner_top_padding: f64,
    pub radical_line_jut: f64,
    pub radical_outer_top_padding: f64,
    pub radical_outer_right_padding: f64,
    pub frac_scale: f64,
    pub frac_num_offset: f64,
    pub frac_den_offset: f64,
    pub frac_line_jut: f64,
    pub frac_side_padding: f64,
    pub frac_top_padding: f64,
    pub frac_bottom_padding: f64,
}

impl Default for Metrics {
    fn default() -> Self {
        Metrics {
            char_width: 0.5,
            char_height: 0.526,
            char_depth: 0.462,
            empty_width: 0.5,
            binop_space: 0.2,
            bracket_width: 0.389,
            bracket_jut: 0.072,
            bracket_padding: 0.072,
            script_lower_scale: 0.73,
            script_upper_scale: 0.91,
            script_middle: 0.02,
            radical_width: 0.833,
            radical_inner_top_padding: 0.073,
            radical_line_jut: 0.15,
            radical_outer_top_padding: 0.073,
            radical_outer_right_padding: 0.098,
            frac_scale: 0.91,
            frac_num_offset: 0.0,
            frac_den_offset: 0.079,
            frac_line_jut: 0.09,
            frac_side_padding: 0.18,
            frac_top_padding: 0.0,
            frac_bottom_padding: 0.09,
        }
    }
}

/// A box measured from its baseline origin: `height` above, `depth` below.
/// The y axis points down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub position: DVec2,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub scale: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds {
            position: DVec2::ZERO,
            width: 0.0,
            height: 0.0,
            depth: 0.0,
            scale: 1.0,
        }
    }
}

impl Bounds {
    fn line_box(m: &Metrics) -> Self {
        Bounds {
            height: m.char_height,
            depth: m.char_depth,
            ..Default::default()
        }
    }

    pub fn left(&self) -> f64 {
        self.position.x
    }

    pub fn top(&self) -> f64 {
        self.position.y - self.height
    }

    pub fn right(&self) -> f64 {
        self.position.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.position.y + self.depth
    }

    fn transform(&mut self, position: DVec2, scale: f64) -> (DVec2, f64) {
        self.width *= scale;
        self.height *= scale;
        self.depth *= scale;
        self.scale *= scale;
        self.position = position + scale * self.position;
        (self.position, self.scale)
    }

    fn scale(&mut self, scale: f64) {
        self.width *= scale;
        self.height *= scale;
        self.depth *= scale;
        self.scale *= scale;
    }

    fn union(&mut self, other: &Bounds) {
        debug_assert_eq!(self.position, DVec2::ZERO);
        debug_assert_eq!(self.scale, 1.0);
        self.width = (other.width + other.position.x).max(self.width);
        self.height = (other.height - other.position.y).max(self.height);
        self.depth = (other.depth + other.position.y).max(self.depth);
    }
}

/// A horizontal rule: fraction bars and radical overbars.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Line {
    pub x_min: f64,
    pub x_max: f64,
    pub y: f64,
}

impl Line {
    fn transform(&mut self, position: DVec2, scale: f64) {
        self.x_min = position.x + scale * self.x_min;
        self.x_max = position.x + scale * self.x_max;
        self.y = position.y + scale * self.y;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A glyph centred in its box.
    Char { ch: char, italic: bool },
    Bracket { inner: Tree },
    Script {
        lower: Option<Tree>,
        upper: Option<Tree>,
    },
    Radical { arg: Tree, line: Line },
    Frac { num: Tree, den: Tree, line: Line },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tree {
    pub bounds: Bounds,
    pub nodes: Vec<(Bounds, Node)>,
}

fn is_binop(ch: char) -> bool {
    matches!(
        ch,
        '+' | '−' | '×' | '÷' | '=' | '<' | '>' | '≤' | '≥' | '≠' | '≈'
    )
}

fn is_binop_node(node: &Node) -> bool {
    matches!(node, Node::Char { ch, italic: false } if is_binop(*ch))
}

fn push_text(nodes: &mut Vec<(Bounds, Node)>, text: &str, italic: bool) {
    nodes.extend(
        text.chars()
            .map(|ch| (Bounds::default(), Node::Char { ch, italic })),
    );
}

impl From<&[Fragment]> for Tree {
    fn from(fragments: &[Fragment]) -> Self {
        let mut nodes = vec![];
        for fragment in fragments {
            let node = match fragment {
                Fragment::Glyph { text, style } => {
                    push_text(&mut nodes, text, *style == Style::Italic);
                    continue;
                }
                Fragment::Operator(ch) => Node::Char {
                    ch: *ch,
                    italic: false,
                },
                Fragment::Function { name, arguments } => {
                    push_text(&mut nodes, name, false);
                    match arguments {
                        Some(arguments) => Node::Bracket {
                            inner: arguments.as_slice().into(),
                        },
                        None => Node::Char {
                            ch: '(',
                            italic: false,
                        },
                    }
                }
                Fragment::Fraction {
                    numerator,
                    denominator,
                } => Node::Frac {
                    num: numerator.as_slice().into(),
                    den: denominator.as_slice().into(),
                    line: Line::default(),
                },
                Fragment::Power { base, exponent } => {
                    nodes.extend(Tree::from(base.as_slice()).nodes);
                    Node::Script {
                        lower: None,
                        upper: Some(exponent.as_slice().into()),
                    }
                }
                Fragment::Subscript { base, subscript } => {
                    nodes.extend(Tree::from(base.as_slice()).nodes);
                    Node::Script {
                        lower: Some(subscript.as_slice().into()),
                        upper: None,
                    }
                }
                Fragment::Radical { radicand } => Node::Radical {
                    arg: radicand.as_slice().into(),
                    line: Line::default(),
                },
                Fragment::Group(inner) => Node::Bracket {
                    inner: inner.as_slice().into(),
                },
            };
            nodes.push((Bounds::default(), node));
        }
        Tree {
            bounds: Bounds::default(),
            nodes,
        }
    }
}

impl Tree {
    fn layout_relative(&mut self, m: &Metrics) {
        self.bounds = Bounds::line_box(m);

        if self.nodes.is_empty() {
            self.bounds.width = m.empty_width;
            return;
        }

        for i in 0..self.nodes.len() {
            let previous_was_operand = i > 0 && !is_binop_node(&self.nodes[i - 1].1);
            let (bounds, node) = &mut self.nodes[i];
            *bounds = Bounds::line_box(m);

            match node {
                Node::Char { ch, .. } => {
                    let space = match *ch {
                        '+' | '−' if !previous_was_operand => 0.0,
                        ch if is_binop(ch) => m.binop_space,
                        _ => 0.0,
                    };
                    bounds.width = m.char_width + 2.0 * space;
                }
                Node::Bracket { inner } => {
                    inner.layout_relative(m);
                    inner.bounds.position.x = m.bracket_width;
                    let top = inner.bounds.top() - m.bracket_jut;
                    let bottom = inner.bounds.bottom() + m.bracket_jut;
                    bounds.width = inner.bounds.right() + m.bracket_width;
                    bounds.height = -top + m.bracket_padding;
                    bounds.depth = bottom + m.bracket_padding;
                }
                Node::Script { lower, upper } => {
                    if let Some(lower) = lower {
                        lower.layout_relative(m);
                        lower.bounds.scale(m.script_lower_scale);
                        lower.bounds.position.y = m.script_middle + lower.bounds.height;
                        bounds.union(&lower.bounds);
                    }
                    if let Some(upper) = upper {
                        upper.layout_relative(m);
                        upper.bounds.scale(m.script_upper_scale);
                        upper.bounds.position.y = m.script_middle - upper.bounds.depth;
                        bounds.union(&upper.bounds);
                    }
                }
                Node::Radical { arg, line } => {
                    arg.layout_relative(m);
                    arg.bounds.position.x = m.radical_width + m.radical_line_jut;
                    line.x_min = m.radical_width;
                    line.x_max = arg.bounds.right() + m.radical_line_jut;
                    line.y = arg.bounds.top() - m.radical_inner_top_padding;
                    bounds.union(&Bounds {
                        width: line.x_max + m.radical_outer_right_padding,
                        height: -line.y + m.radical_outer_top_padding,
                        depth: arg.bounds.bottom(),
                        ..Default::default()
                    });
                }
                Node::Frac { num, den, line } => {
                    num.layout_relative(m);
                    den.layout_relative(m);
                    num.bounds.scale(m.frac_scale);
                    den.bounds.scale(m.frac_scale);
                    let max_width = num.bounds.width.max(den.bounds.width);
                    line.x_min = m.frac_side_padding;
                    line.x_max = m.frac_side_padding + 2.0 * m.frac_line_jut + max_width;
                    line.y = 0.0;
                    bounds.width = max_width + (m.frac_side_padding + m.frac_line_jut) * 2.0;
                    bounds.height = num.bounds.height
                        + num.bounds.depth
                        + m.frac_num_offset
                        + m.frac_top_padding;
                    bounds.depth = den.bounds.height
                        + den.bounds.depth
                        + m.frac_den_offset
                        + m.frac_bottom_padding;
                    num.bounds.position = dvec2(
                        (bounds.width - num.bounds.width) / 2.0,
                        -num.bounds.depth - m.frac_num_offset,
                    );
                    den.bounds.position = dvec2(
                        (bounds.width - den.bounds.width) / 2.0,
                        den.bounds.height + m.frac_den_offset,
                    );
                }
            }

            bounds.position.x += self.bounds.width;
            self.bounds.union(bounds);
        }
    }

    fn make_absolute(&mut self, position: DVec2, scale: f64) {
        let (position, scale) = self.bounds.transform(position, scale);
        for (bounds, node) in &mut self.nodes {
            let (position, scale) = bounds.transform(position, scale);
            match node {
                Node::Char { .. } => {}
                Node::Bracket { inner } => inner.make_absolute(position, scale),
                Node::Script { lower, upper } => {
                    if let Some(lower) = lower {
                        lower.make_absolute(position, scale);
                    }
                    if let Some(upper) = upper {
                        upper.make_absolute(position, scale);
                    }
                }
                Node::Radical { arg, line } => {
                    line.transform(position, scale);
                    arg.make_absolute(position, scale);
                }
                Node::Frac { num, den, line } => {
                    line.transform(position, scale);
                    num.make_absolute(position, scale);
                    den.make_absolute(position, scale);
                }
            }
        }
    }
}

pub fn layout_with(tree: &RenderTree, metrics: &Metrics) -> Tree {
    let mut layout = Tree::from(tree.fragments.as_slice());
    layout.layout_relative(metrics);
    layout.make_absolute(DVec2::ZERO, 1.0);
    layout
}

/// Places every glyph, rule and script of `tree` in absolute em coordinates
/// with the baseline of the outermost row at `y = 0`.
pub fn layout(tree: &RenderTree) -> Tree {
    layout_with(tree, &Metrics::default())
}
