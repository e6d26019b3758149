use crate::context::{CompileOptions, CompilerContext};
use mockup_splitter::ComponentDefinition;

pub fn props_interface_name(component_name: &str) -> String {
    format!("{}Props", component_name)
}

/// TypeScript interface for a component's suggested props
pub fn compile_props_interface(component: &ComponentDefinition) -> String {
    let ctx = CompilerContext::new(CompileOptions::default());

    ctx.add_line(&format!(
        "interface {} {{",
        props_interface_name(&component.identifier())
    ));
    ctx.indent();
    for prop in &component.suggested_props {
        let optional = if prop.required { "" } else { "?" };
        ctx.add_line(&format!("{}{}: {};", prop.name, optional, prop.prop_type));
    }
    ctx.dedent();
    ctx.add_line("}");

    ctx.get_output()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockup_splitter::ComponentSplitter;

    #[test]
    fn test_props_interface() {
        let mut splitter = ComponentSplitter::default();
        let result = splitter.split(
            r#"<header><h1>Acme</h1><button onclick="save()">Save</button></header>"#,
        );
        let header = &result.components[0];
        let interface = compile_props_interface(header);

        assert!(interface.starts_with("interface HeaderProps {\n"));
        assert!(interface.contains("  title?: string;\n"));
        assert!(interface.contains("  label?: string;\n"));
        assert!(interface.contains("  onClick?: () => void;\n"));
        assert!(interface.ends_with("}\n"));
    }
}
