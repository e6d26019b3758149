use crate::options::CssOptions;
use crate::strategy::{
    apply_class, element_declarations, styled_elements, ClassRegistry, CssConversionResult,
    CssStats, CssStrategy, DocumentConversion,
};
use crate::stylesheet::{CssRule, Declarations, Stylesheet};
use indexmap::IndexMap;
use mockup_common::GeneratedFile;
use mockup_parser::{serialize, ParsedDocument};

/// Scoped CSS module strategy. Class names are content hashes, so the same
/// input always yields the same stylesheet.
#[derive(Debug, Default)]
pub struct ModuleStrategy {
    options: CssOptions,
    stylesheet: Stylesheet,
    stats: CssStats,
}

impl ModuleStrategy {
    pub fn new(options: CssOptions) -> Self {
        Self {
            options,
            stylesheet: Stylesheet::new(),
            stats: CssStats::default(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.module.css", self.options.file_name)
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }
}

/// Replace values used at least twice by custom properties declared in a
/// `:root` rule. Returns the number of variables created.
fn promote_variables(rules: &mut [CssRule]) -> (Option<CssRule>, usize) {
    let mut counts: IndexMap<(String, String), usize> = IndexMap::new();
    for rule in rules.iter() {
        for (property, value) in &rule.declarations {
            *counts.entry((property.clone(), value.clone())).or_default() += 1;
        }
    }

    let mut per_property: IndexMap<String, usize> = IndexMap::new();
    let mut variables: IndexMap<(String, String), String> = IndexMap::new();
    for ((property, value), count) in counts {
        if count < 2 || property.starts_with("--") {
            continue;
        }
        let n = per_property.entry(property.clone()).or_default();
        *n += 1;
        let name = format!("--{}-{}", property, n);
        variables.insert((property, value), name);
    }

    if variables.is_empty() {
        return (None, 0);
    }

    for rule in rules.iter_mut() {
        for (property, value) in rule.declarations.iter_mut() {
            if let Some(name) = variables.get(&(property.clone(), value.clone())) {
                *value = format!("var({})", name);
            }
        }
    }

    let root: Declarations = variables
        .iter()
        .map(|((_, value), name)| (name.clone(), value.clone()))
        .collect();
    let created = root.len();
    (Some(CssRule::new(":root", root)), created)
}

impl CssStrategy for ModuleStrategy {
    fn strategy_name(&self) -> &'static str {
        "modules"
    }

    fn options(&self) -> &CssOptions {
        &self.options
    }

    fn convert_document(&mut self, doc: &ParsedDocument) -> DocumentConversion {
        self.stats = CssStats::default();
        self.stylesheet = Stylesheet::new();

        let mut document = doc.clone();
        let mut registry = ClassRegistry::new(&self.options.class_prefix, self.options.optimize);

        for (ordinal, id) in styled_elements(doc).into_iter().enumerate() {
            let declarations = element_declarations(&doc.node(id).attributes);
            self.stats.elements_processed += 1;
            self.stats.declarations_processed += declarations.len();
            let class = registry.class_for(&declarations, ordinal);
            apply_class(&mut document, id, &class, self.options.preserve_inline);
        }

        let mut rules = std::mem::take(&mut registry.rules);
        if self.options.use_css_variables {
            let (root, created) = promote_variables(&mut rules);
            self.stats.variables_created = created;
            if let Some(root) = root {
                self.stylesheet.add_rule(root);
            }
        }
        for rule in rules {
            self.stylesheet.add_rule(rule);
        }

        self.stats.classes_generated = registry.classes_generated();
        self.stats.cache_hits = registry.cache_hits;
        tracing::debug!(
            classes = self.stats.classes_generated,
            cache_hits = self.stats.cache_hits,
            "module conversion finished"
        );

        let css = self.generate_css();
        let generated_files = if css.is_empty() {
            Vec::new()
        } else {
            vec![GeneratedFile::stylesheet(self.file_name(), css.clone())]
        };

        let result = CssConversionResult {
            html: serialize(&document),
            css,
            class_name_map: registry.class_name_map,
            generated_files,
            warnings: Vec::new(),
        };
        DocumentConversion { document, result }
    }

    fn generate_css(&self) -> String {
        self.stylesheet.to_css()
    }

    fn stats(&self) -> CssStats {
        self.stats
    }
}
