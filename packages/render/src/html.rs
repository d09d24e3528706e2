use crate::vdom::{RenderedDocument, VNode};

/// Options for HTML emission
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Put block elements on their own lines
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Emit `data-key` attributes for keyed elements
    pub keys: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            keys: false,
        }
    }
}

struct Context<'a> {
    options: &'a HtmlOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn start_line(&mut self) {
        if self.options.pretty {
            for _ in 0..self.depth {
                self.buffer.push_str(&self.options.indent);
            }
        }
    }

    fn end_line(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Emit a rendered document as an HTML fragment
pub fn to_html(document: &RenderedDocument, options: &HtmlOptions) -> String {
    let mut ctx = Context::new(options);
    for node in &document.nodes {
        write_block_level(node, &mut ctx);
    }
    ctx.get_output()
}

/// Emit a single node inline, without layout
pub fn node_to_html(node: &VNode) -> String {
    let options = HtmlOptions {
        pretty: false,
        ..HtmlOptions::default()
    };
    let mut ctx = Context::new(&options);
    write_inline(node, &mut ctx);
    ctx.get_output()
}

fn write_block_level(node: &VNode, ctx: &mut Context<'_>) {
    let VNode::Element { tag, children, .. } = node else {
        ctx.start_line();
        write_inline(node, ctx);
        ctx.end_line();
        return;
    };

    if !is_block_tag(tag) || !has_block_children(children) {
        ctx.start_line();
        write_inline(node, ctx);
        ctx.end_line();
        return;
    }

    ctx.start_line();
    write_open_tag(node, ctx);
    ctx.end_line();
    ctx.depth += 1;
    for child in children {
        write_block_level(child, ctx);
    }
    ctx.depth -= 1;
    ctx.start_line();
    ctx.add(&format!("</{}>", tag));
    ctx.end_line();
}

fn write_inline(node: &VNode, ctx: &mut Context<'_>) {
    match node {
        VNode::Text { content } => ctx.add(&escape_html(content)),
        VNode::Element { tag, children, .. } => {
            write_open_tag(node, ctx);
            for child in children {
                write_inline(child, ctx);
            }
            ctx.add(&format!("</{}>", tag));
        }
    }
}

fn write_open_tag(node: &VNode, ctx: &mut Context<'_>) {
    if let VNode::Element {
        tag,
        attributes,
        key,
        ..
    } = node
    {
        ctx.add(&format!("<{}", tag));
        if ctx.options.keys {
            if let Some(key) = key {
                ctx.add(&format!(" data-key=\"{}\"", escape_html(key)));
            }
        }
        for (name, value) in attributes {
            ctx.add(&format!(" {}=\"{}\"", name, escape_html(value)));
        }
        ctx.add(">");
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_block_tag(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "h1" | "h2" | "blockquote" | "ul" | "ol" | "li" | "div"
    )
}

fn has_block_children(children: &[VNode]) -> bool {
    children
        .iter()
        .any(|child| child.tag().map(is_block_tag).unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_text_and_attributes() {
        let node = VNode::element("a")
            .with_attr("href", "https://a.io/?q=\"x\"&y")
            .with_child(VNode::text("<textarea>"));

        assert_eq!(
            node_to_html(&node),
            "<a href=\"https://a.io/?q=&quot;x&quot;&amp;y\">&lt;textarea&gt;</a>"
        );
    }

    #[test]
    fn test_pretty_lists_nest() {
        let doc = RenderedDocument {
            nodes: vec![VNode::element("ul")
                .with_child(VNode::element("li").with_child(VNode::text("one")))
                .with_child(VNode::element("li").with_child(VNode::text("two")))],
        };

        assert_eq!(
            to_html(&doc, &HtmlOptions::default()),
            "<ul>\n  <li>one</li>\n  <li>two</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_keys_are_opt_in() {
        let doc = RenderedDocument {
            nodes: vec![VNode::element("p").with_key("7").with_child(VNode::text("x"))],
        };
        let options = HtmlOptions {
            pretty: false,
            keys: true,
            ..HtmlOptions::default()
        };

        assert_eq!(to_html(&doc, &options), "<p data-key=\"7\">x</p>");
        assert_eq!(to_html(&doc, &HtmlOptions::default()), "<p>x</p>\n");
    }
}
