use crate::attributes::{TransformType, TransformedAttribute, TransformedValue};
use crate::context::{CompileOptions, CompilerContext, ComponentReference, StylesheetImport};
use crate::definitions::{compile_props_interface, props_interface_name};
use crate::error::{CompileError, CompileResult};
use indexmap::IndexMap;
use mockup_parser::attributes::html_name_for;
use mockup_parser::serializer::is_void_element;
use mockup_parser::{AttrValue, NodeId, NodeKind, ParsedDocument, ParsedNode};
use mockup_splitter::{component_identifier, ComponentDefinition, PropBinding, SplitResult};

/// Render the subtree under `id` as JSX
pub fn compile_to_jsx(doc: &ParsedDocument, id: NodeId, options: CompileOptions) -> String {
    let ctx = CompilerContext::new(options);
    compile_node(doc, id, &ctx);
    ctx.get_output()
}

/// Write formatted JSX for a node and its descendants into the context
pub fn compile_node(doc: &ParsedDocument, id: NodeId, ctx: &CompilerContext) {
    let node = doc.node(id);
    match node.kind {
        NodeKind::Fragment => {
            let children = rendered_children(doc, node);
            if children.is_empty() {
                ctx.add_line("<></>");
                return;
            }
            ctx.add_line("<>");
            ctx.indent();
            compile_children(doc, &children, ctx);
            ctx.dedent();
            ctx.add_line("</>");
        }
        NodeKind::Text => compile_text(node, false, false, ctx),
        NodeKind::Comment => {
            let text = node.text.as_deref().unwrap_or("").trim().replace("*/", "* /");
            ctx.add_line(&format!("{{/* {} */}}", text));
        }
        NodeKind::Element => compile_element(doc, node, ctx),
    }
}

fn compile_element(doc: &ParsedDocument, node: &ParsedNode, ctx: &CompilerContext) {
    if let Some(reference) = ctx.references.get(&node.id) {
        ctx.add_line(&compile_reference(reference));
        return;
    }

    let tag = node.tag();
    let open = format!("<{}{}", tag, compile_attributes(doc, node, ctx));

    // script and style content is injected verbatim
    if node.attributes.has_danger_html {
        let raw = doc.text_content(node.id);
        if raw.trim().is_empty() {
            ctx.add_line(&format!("{} />", open));
        } else {
            ctx.add_line(&format!(
                "{} dangerouslySetInnerHTML={{{{ __html: {} }}}} />",
                open,
                js_string(&raw)
            ));
        }
        return;
    }

    if let Some(prop) = ctx.bound_prop(node.id, &PropBinding::Text) {
        ctx.add_line(&format!("{}>{{{}}}</{}>", open, prop, tag));
        return;
    }

    let slot = ctx.children_slot == Some(node.id);
    let children = rendered_children(doc, node);

    if is_void_element(tag) || (children.is_empty() && !slot) {
        ctx.add_line(&format!("{} />", open));
        return;
    }

    if !slot && children.iter().all(|child| child.is_text()) {
        let text: String = children
            .iter()
            .filter_map(|child| child.text.as_deref())
            .collect();
        ctx.add_line(&format!(
            "{}>{}</{}>",
            open,
            escape_jsx_text(&collapse_whitespace(&text)),
            tag
        ));
        return;
    }

    ctx.add_line(&format!("{}>", open));
    ctx.indent();
    compile_children(doc, &children, ctx);
    if slot {
        ctx.add_line("{children}");
    }
    ctx.dedent();
    ctx.add_line(&format!("</{}>", tag));
}

fn compile_children(doc: &ParsedDocument, children: &[&ParsedNode], ctx: &CompilerContext) {
    for (i, child) in children.iter().enumerate() {
        if child.is_text() {
            compile_text(child, i > 0, i + 1 < children.len(), ctx);
        } else {
            compile_node(doc, child.id, ctx);
        }
    }
}

/// Text on its own line. Whitespace next to a sibling element survives as
/// an explicit `{" "}`.
fn compile_text(node: &ParsedNode, has_prev: bool, has_next: bool, ctx: &CompilerContext) {
    let raw = node.text.as_deref().unwrap_or("");
    let text = collapse_whitespace(raw);
    if text.is_empty() {
        return;
    }

    let mut line = String::new();
    if has_prev && raw.starts_with(char::is_whitespace) {
        line.push_str("{\" \"}");
    }
    line.push_str(&escape_jsx_text(&text));
    if has_next && raw.ends_with(char::is_whitespace) {
        line.push_str("{\" \"}");
    }
    ctx.add_line(&line);
}

fn rendered_children<'a>(doc: &'a ParsedDocument, node: &ParsedNode) -> Vec<&'a ParsedNode> {
    doc.children(node.id)
        .filter(|child| match child.kind {
            NodeKind::Text => child.text.as_deref().is_some_and(|t| !t.trim().is_empty()),
            _ => true,
        })
        .collect()
}

fn compile_reference(reference: &ComponentReference) -> String {
    let mut tag = format!("<{}", reference.name);
    for (name, value) in &reference.props {
        tag.push(' ');
        tag.push_str(&jsx_attribute(&TransformedAttribute {
            name: name.clone(),
            value: TransformedValue::Text(value.clone()),
            transform_type: TransformType::Direct,
        }));
    }
    tag.push_str(" />");
    tag
}

/// Attribute list with a leading space per attribute
fn compile_attributes(doc: &ParsedDocument, node: &ParsedNode, ctx: &CompilerContext) -> String {
    let mut parts = Vec::new();
    let tag = node.tag();
    // `selected` options become the select's defaultValue
    let lifted_selection = tag == "option" && inside_select(doc, node);

    if let Some(class_name) = class_attribute(&node.attributes.classes(), ctx) {
        parts.push(class_name);
    }

    for (key, value) in &node.attributes.html {
        let html_name = html_name_for(key).unwrap_or(key);
        if lifted_selection && html_name == "selected" {
            continue;
        }
        let raw = match value {
            AttrValue::Bool(true) => "",
            AttrValue::Bool(false) => continue,
            AttrValue::Text(text) => text.as_str(),
        };
        let attribute = ctx.transformer.transform_for(tag, html_name, raw);
        if attribute.transform_type == TransformType::Remove {
            continue;
        }

        let binding = PropBinding::Attribute {
            name: html_name.to_string(),
        };
        match ctx.bound_prop(node.id, &binding) {
            Some(prop) => parts.push(format!("{}={{{}}}", attribute.name, prop)),
            None => parts.push(jsx_attribute(&attribute)),
        }
    }

    if let Some(selection) = select_default(doc, node) {
        parts.push(selection);
    }

    if let Some(style) = node.attributes.style.as_ref().filter(|s| !s.is_empty()) {
        parts.push(format!("style={{{}}}", style_object(style)));
    }

    for event in &node.attributes.events {
        let attribute = ctx
            .transformer
            .transform(&format!("on{}", event.event_type), &event.handler);
        let name = if attribute.transform_type == TransformType::Event {
            attribute.name
        } else {
            event_prop_name(&event.event_type)
        };

        let binding = PropBinding::Event {
            event: event.event_type.clone(),
        };
        match ctx.bound_prop(node.id, &binding) {
            Some(prop) => parts.push(format!("{}={{{}}}", name, prop)),
            None => parts.push(format!("{}={{{}}}", name, arrow_handler(&event.handler))),
        }
    }

    parts.iter().map(|part| format!(" {}", part)).collect()
}

fn inside_select(doc: &ParsedDocument, node: &ParsedNode) -> bool {
    let mut parent = node.parent;
    while let Some(id) = parent {
        let ancestor = doc.node(id);
        if ancestor.tag() == "select" {
            return true;
        }
        parent = ancestor.parent;
    }
    false
}

/// `defaultValue` of a select without a `value`, taken from its selected
/// options. A single select keeps the last one, as browsers do.
fn select_default(doc: &ParsedDocument, node: &ParsedNode) -> Option<String> {
    if node.tag() != "select" || node.attributes.has("value") {
        return None;
    }

    let selected: Vec<String> = doc
        .subtree(node.id)
        .into_iter()
        .map(|id| doc.node(id))
        .filter(|option| option.tag() == "option" && option.attributes.has("selected"))
        .map(|option| match option.attributes.get("value") {
            Some(value) => value.to_string(),
            None => collapse_whitespace(&doc.text_content(option.id)),
        })
        .collect();

    if node.attributes.has("multiple") {
        if selected.is_empty() {
            return None;
        }
        let values: Vec<String> = selected.iter().map(|value| js_string(value)).collect();
        return Some(format!("defaultValue={{[{}]}}", values.join(", ")));
    }

    selected.last().map(|value| {
        jsx_attribute(&TransformedAttribute {
            name: "defaultValue".into(),
            value: TransformedValue::Text(value.clone()),
            transform_type: TransformType::Direct,
        })
    })
}

/// `className`, with CSS module classes turned into `styles["x"]`
fn class_attribute(classes: &[&str], ctx: &CompilerContext) -> Option<String> {
    if classes.is_empty() {
        return None;
    }

    if !classes.iter().any(|class| ctx.is_module_class(class)) {
        return Some(format!("className=\"{}\"", classes.join(" ")));
    }

    if let [only] = classes {
        return Some(format!("className={{styles[{}]}}", js_string(only)));
    }

    let template = classes
        .iter()
        .map(|class| {
            if ctx.is_module_class(class) {
                format!("${{styles[{}]}}", js_string(class))
            } else {
                class.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    Some(format!("className={{`{}`}}", template))
}

fn jsx_attribute(attribute: &TransformedAttribute) -> String {
    let name = &attribute.name;
    match &attribute.value {
        TransformedValue::Bool(true) => name.clone(),
        TransformedValue::Bool(false) => format!("{}={{false}}", name),
        TransformedValue::Number(number) => format!("{}={{{}}}", name, number),
        TransformedValue::Object(style) => format!("{}={{{}}}", name, style_object(style)),
        TransformedValue::Text(text) if text.contains(['"', '&']) => {
            format!("{}={{{}}}", name, js_string(text))
        }
        TransformedValue::Text(text) => format!("{}=\"{}\"", name, text),
    }
}

/// `{ backgroundColor: "red", "--gap": "4px" }`
fn style_object(style: &IndexMap<String, String>) -> String {
    if style.is_empty() {
        return "{}".into();
    }
    let entries = style
        .iter()
        .map(|(key, value)| {
            let key = if is_identifier(key) {
                key.clone()
            } else {
                js_string(key)
            };
            format!("{}: {}", key, js_string(value))
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{ {} }}", entries)
}

fn arrow_handler(handler: &str) -> String {
    let handler = handler.trim();
    if handler.is_empty() {
        return "() => {}".into();
    }
    if handler.ends_with(';') || handler.ends_with('}') {
        format!("(event) => {{ {} }}", handler)
    } else {
        format!("(event) => {{ {}; }}", handler)
    }
}

fn event_prop_name(event_type: &str) -> String {
    let mut chars = event_type.chars();
    match chars.next() {
        Some(first) => format!("on{}{}", first.to_ascii_uppercase(), chars.as_str()),
        None => "on".into(),
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape characters JSX text cannot hold literally
pub fn escape_jsx_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '{' => out.push_str("{\"{\"}"),
            '}' => out.push_str("{\"}\"}"),
            _ => out.push(c),
        }
    }
    out
}

/// How a nested component is rendered: collapsed pattern instances point
/// at their representative and pass the props that differ
fn component_reference(split: &SplitResult, child: &ComponentDefinition) -> ComponentReference {
    let representative = split.representative(child);
    let props = child
        .instance_of
        .iter()
        .flat_map(|instance| instance.props.iter())
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    ComponentReference {
        name: representative.identifier(),
        module: representative.name.clone(),
        props,
    }
}

/// Render a complete component module
pub fn compile_component(
    doc: &ParsedDocument,
    split: &SplitResult,
    component: &ComponentDefinition,
    options: &CompileOptions,
) -> CompileResult<String> {
    let root = doc
        .get(component.node())
        .ok_or_else(|| CompileError::MissingNode {
            component: component.name.clone(),
            node: component.node(),
        })?;

    let mut ctx = CompilerContext::new(options.clone());
    let mut imports: Vec<(String, String)> = Vec::new();

    for child_id in &component.children {
        let child = split
            .get(child_id)
            .ok_or_else(|| CompileError::UnknownChild {
                parent: component.name.clone(),
                id: child_id.clone(),
            })?;
        add_reference(&mut ctx, &mut imports, split, child);
    }

    for prop in &component.suggested_props {
        if let Some(source) = &prop.source {
            ctx.bindings
                .entry(source.node)
                .or_default()
                .push((source.binding.clone(), prop.name.clone()));
        }
    }
    if component.suggested_props.iter().any(|p| p.name == "children") {
        ctx.children_slot = Some(root.id);
    }

    compile_imports(&imports, &ctx);

    if options.typescript && !component.suggested_props.is_empty() {
        ctx.add(&compile_props_interface(component));
        ctx.add("\n");
    }

    compile_function(
        &component.identifier(),
        &destructured_props(component, options.typescript),
        doc,
        root.id,
        &ctx,
    );

    tracing::debug!(component = %component.name, children = imports.len(), "compiled component");
    Ok(ctx.get_output())
}

/// Page component rendering the whole document, with every top-level
/// component replaced by a reference
pub fn compile_app(
    doc: &ParsedDocument,
    split: &SplitResult,
    name: &str,
    options: &CompileOptions,
) -> String {
    let mut ctx = CompilerContext::new(options.clone());
    let mut imports: Vec<(String, String)> = Vec::new();

    for component in split.components.iter().filter(|c| c.parent_id.is_none()) {
        add_reference(&mut ctx, &mut imports, split, component);
    }

    compile_imports(&imports, &ctx);
    compile_function(&component_identifier(name), "", doc, doc.root, &ctx);
    ctx.get_output()
}

fn add_reference(
    ctx: &mut CompilerContext,
    imports: &mut Vec<(String, String)>,
    split: &SplitResult,
    component: &ComponentDefinition,
) {
    let reference = component_reference(split, component);
    if !imports.iter().any(|(name, _)| *name == reference.name) {
        imports.push((reference.name.clone(), reference.module.clone()));
    }
    ctx.references.insert(component.node(), reference);
}

/// `(identifier, file stem)` pairs
fn compile_imports(components: &[(String, String)], ctx: &CompilerContext) {
    ctx.add_line("import React from \"react\";");
    for (name, module) in components {
        ctx.add_line(&format!("import {} from \"./{}\";", name, module));
    }
    match &ctx.options.stylesheet {
        Some(StylesheetImport::Module { path }) => {
            ctx.add_line(&format!("import styles from \"./{}\";", path))
        }
        Some(StylesheetImport::Global { path }) => ctx.add_line(&format!("import \"./{}\";", path)),
        None => {}
    }
    ctx.add("\n");
}

fn compile_function(name: &str, params: &str, doc: &ParsedDocument, root: NodeId, ctx: &CompilerContext) {
    ctx.add_line(&format!("const {} = ({}) => {{", name, params));
    ctx.indent();
    ctx.add_line("return (");
    ctx.indent();
    compile_node(doc, root, ctx);
    ctx.dedent();
    ctx.add_line(");");
    ctx.dedent();
    ctx.add_line("};");
    ctx.add("\n");
    ctx.add_line(&format!("export default {};", name));
}

/// `{ title = "Alpha", onClick }`, typed with the props interface in TSX
fn destructured_props(component: &ComponentDefinition, typescript: bool) -> String {
    if component.suggested_props.is_empty() {
        return String::new();
    }

    let names = component
        .suggested_props
        .iter()
        .map(|prop| match &prop.default_value {
            Some(value) => format!("{} = {}", prop.name, js_string(value)),
            None => prop.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ");

    if typescript {
        format!("{{ {} }}: {}", names, props_interface_name(&component.identifier()))
    } else {
        format!("{{ {} }}", names)
    }
}

/// Barrel file re-exporting every component
pub fn compile_index<'a, I>(components: I) -> String
where
    I: IntoIterator<Item = &'a ComponentDefinition>,
{
    components
        .into_iter()
        .map(|component| index_export(&component.name))
        .collect()
}

/// One barrel line for the module `name`
pub fn index_export(name: &str) -> String {
    format!(
        "export {{ default as {} }} from \"./{}\";\n",
        component_identifier(name),
        name
    )
}
