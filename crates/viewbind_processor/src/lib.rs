//! Round driver for view-binding annotations.
//!
//! One call to [`Processor::process`] resolves resource ids, validates and
//! collects every supported annotation, links each target to its nearest bound
//! ancestor and hands one generated companion per target to a [`SourceSink`].
//! All round state is owned by the call and dropped when it returns.

pub mod annotations;
pub mod checks;
pub mod collector;
pub mod diagnostics;
pub mod error;
pub mod linker;
pub mod options;
pub mod resolver;
pub mod sink;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{ProcessorError, WriteError};
pub use linker::LinkedTargets;
pub use options::ProcessorOptions;
pub use sink::{DirectorySink, GeneratedFile, MemorySink, SinkError, SourceSink};

use tracing::{debug, info, warn};
use viewbind_codegen_java::{BindingClassGenerator, JavaCodeGenConfig};
use viewbind_elements::RoundEnvironment;
use viewbind_model::{ListenerKind, TargetBindingSet, LISTENERS};

/// What one round produced.
#[derive(Debug, Default)]
pub struct RoundOutcome {
    /// Frozen binding sets keyed by target class.
    pub bindings: LinkedTargets,
    /// Qualified names of the companions the sink accepted.
    pub written: Vec<String>,
    pub diagnostics: Diagnostics,
}

impl RoundOutcome {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

#[derive(Debug, Clone)]
pub struct Processor {
    options: ProcessorOptions,
    listener_kinds: Vec<&'static ListenerKind>,
}

impl Processor {
    pub fn new(options: ProcessorOptions) -> Self {
        Self {
            options,
            listener_kinds: LISTENERS.to_vec(),
        }
    }

    /// Reads options from the round's host option map.
    pub fn from_environment(env: &RoundEnvironment, diagnostics: &mut Diagnostics) -> Self {
        Self::new(ProcessorOptions::from_options(&env.options, diagnostics))
    }

    pub fn options(&self) -> &ProcessorOptions {
        &self.options
    }

    /// Every annotation simple name this processor claims.
    pub fn supported_annotations(&self) -> Vec<&'static str> {
        annotations::supported_annotations(&self.listener_kinds)
    }

    fn code_gen_config(&self) -> JavaCodeGenConfig {
        JavaCodeGenConfig::for_platform(self.options.min_sdk, self.options.debuggable)
    }

    /// Collects and links the round's targets without generating code.
    pub fn collect(&self, env: &RoundEnvironment) -> (LinkedTargets, Diagnostics) {
        let (collected, mut diagnostics) = collector::collect_targets(env, &self.listener_kinds);
        match linker::link_targets(&env.universe, collected, &self.listener_kinds) {
            Ok(linked) => (linked, diagnostics),
            Err(error) => {
                warn!(%error, "linking aborted");
                diagnostics.report(Severity::Error, None, error.to_string());
                (LinkedTargets::new(), diagnostics)
            }
        }
    }

    /// Runs the whole round, writing one companion per bound target.
    ///
    /// A failure to render or write one companion is reported against its
    /// target and the remaining targets are still attempted.
    pub fn process(&self, env: &RoundEnvironment, sink: &mut dyn SourceSink) -> RoundOutcome {
        info!(
            min_sdk = self.options.min_sdk,
            debuggable = self.options.debuggable,
            "processing round"
        );
        let (bindings, mut diagnostics) = self.collect(env);
        let generator = BindingClassGenerator::with_config(self.code_gen_config());

        let mut written = Vec::with_capacity(bindings.len());
        for (target, set) in &bindings {
            match write_binding(&generator, set, sink) {
                Ok(name) => {
                    debug!(target = %target, binding_class = %name, "wrote binding class");
                    written.push(name);
                }
                Err(error) => diagnostics.error(
                    target,
                    format!("Unable to write binding for type {target}: {error}"),
                ),
            }
        }

        info!(
            targets = bindings.len(),
            written = written.len(),
            errors = diagnostics.messages(Severity::Error).len(),
            "round finished"
        );
        RoundOutcome {
            bindings,
            written,
            diagnostics,
        }
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::new(ProcessorOptions::default())
    }
}

/// Reads options from the round itself, then processes it.
pub fn process_round(env: &RoundEnvironment, sink: &mut dyn SourceSink) -> RoundOutcome {
    let mut option_diagnostics = Diagnostics::new();
    let processor = Processor::from_environment(env, &mut option_diagnostics);
    let mut outcome = processor.process(env, sink);
    option_diagnostics.extend(outcome.diagnostics);
    outcome.diagnostics = option_diagnostics;
    outcome
}

fn write_binding(
    generator: &BindingClassGenerator,
    set: &TargetBindingSet,
    sink: &mut dyn SourceSink,
) -> Result<String, WriteError> {
    let source = generator.generate_source(set)?;
    let binding_class = set.binding_class();
    let file = GeneratedFile {
        package: binding_class.package().to_string(),
        simple_name: binding_class.simple_name().to_string(),
        source,
    };
    sink.write(&file)?;
    Ok(file.qualified_name())
}
