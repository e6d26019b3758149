use crate::error::PipelineResult;
use crate::options::ConvertOptions;
use mockup_common::GeneratedFile;
use mockup_compiler_css::{create_strategy, CssConversionResult, CssStrategyKind};
use mockup_compiler_react::{
    compile_app, compile_component, compile_index, index_export, CompileOptions, StylesheetImport,
};
use mockup_parser::{ParseError, ParsedDocument, Parser};
use mockup_splitter::{ComponentSplitter, NameGenerator, SplitResult};
use serde::Serialize;

/// Everything one conversion produced
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionOutput {
    /// Parsed mockup (before styles were moved out of it)
    pub document: ParsedDocument,
    pub split: SplitResult,
    /// Component modules, the barrel index and stylesheets
    pub files: Vec<GeneratedFile>,
    /// Generated stylesheet, if the strategy produced one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<String>,
    pub warnings: Vec<String>,
}

impl ConversionOutput {
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| file.path == path)
    }
}

/// HTML mockup → component files.
///
/// Every stage gets a fresh instance per call, so nothing leaks from one
/// conversion into the next.
#[derive(Debug, Default)]
pub struct Pipeline {
    parser: Parser,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Like [`Pipeline::convert`], failing when no input was given
    pub fn convert_input(
        &mut self,
        html: Option<&str>,
        options: &ConvertOptions,
    ) -> PipelineResult<ConversionOutput> {
        let html = html.ok_or_else(ParseError::missing_input)?;
        self.convert(html, options)
    }

    pub fn convert(&mut self, html: &str, options: &ConvertOptions) -> PipelineResult<ConversionOutput> {
        let mut warnings = Vec::new();

        let document = self.parser.parse(html, &options.split.parse_options(&options.parse));
        warnings.extend(self.parser.warnings().iter().cloned());

        let mut splitter = ComponentSplitter::new(options.split.clone());
        let split = splitter.split_document(&document);
        warnings.extend(split.metadata.warnings.iter().cloned());

        let mut strategy = create_strategy(options.css_strategy, options.css_options.clone());
        let styled = strategy.convert_document(&document);
        warnings.extend(styled.result.warnings.iter().cloned());

        let compile_options = compile_options(options, &styled.result);
        let extension = compile_options.extension();

        let mut files = Vec::new();
        let mut emitted = Vec::new();
        for component in &split.components {
            if split.is_repeat(component) {
                continue;
            }
            let code = compile_component(&styled.document, &split, component, &compile_options)?;
            files.push(GeneratedFile::component(
                format!("{}.{}", component.name, extension),
                code,
            ));
            emitted.push(component);
        }

        let mut index = compile_index(emitted.iter().copied());
        if options.generate_app && !document.metadata.empty {
            let existing: Vec<String> = split.components.iter().map(|c| c.name.clone()).collect();
            let app_name = NameGenerator::new(options.split.naming.clone())
                .generate_unique_name(&options.split.naming.naming_convention.apply("App"), &existing);
            let code = compile_app(&styled.document, &split, &app_name, &compile_options);
            files.push(GeneratedFile::component(format!("{}.{}", app_name, extension), code));
            index.push_str(&index_export(&app_name));
        }

        if !index.is_empty() {
            let index_extension = if options.typescript { "ts" } else { "js" };
            files.push(GeneratedFile::index(format!("index.{}", index_extension), index));
        }

        let stylesheet = (!styled.result.css.is_empty()).then(|| styled.result.css.clone());
        files.extend(styled.result.generated_files.iter().cloned());

        tracing::info!(
            components = split.components.len(),
            files = files.len(),
            warnings = warnings.len(),
            strategy = strategy.strategy_name(),
            "conversion finished"
        );

        Ok(ConversionOutput {
            document,
            split,
            files,
            stylesheet,
            warnings,
        })
    }
}

fn compile_options(options: &ConvertOptions, css: &CssConversionResult) -> CompileOptions {
    let stylesheet_path = css
        .generated_files
        .first()
        .filter(|file| !file.content.is_empty())
        .map(|file| file.path.clone());

    let (stylesheet, module_classes) = match (options.css_strategy, stylesheet_path) {
        (CssStrategyKind::Modules, Some(path)) => (
            Some(StylesheetImport::Module { path }),
            css.class_name_map.keys().cloned().collect(),
        ),
        (CssStrategyKind::External, Some(path)) => {
            (Some(StylesheetImport::Global { path }), Default::default())
        }
        _ => (None, Default::default()),
    };

    CompileOptions {
        typescript: options.typescript,
        stylesheet,
        module_classes,
    }
}

/// Convert with a fresh pipeline and default options
pub fn convert(html: &str) -> PipelineResult<ConversionOutput> {
    Pipeline::new().convert(html, &ConvertOptions::default())
}
