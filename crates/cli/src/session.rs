//! The interactive read-validate-ask loop.

use std::io::{self, BufRead, Write};

use descarte_agent::{GuidanceGuard, LlmClient};
use descarte_core::ambiguity::{AnswerClassifier, AnswerContext, TriStateAnswer};
use descarte_core::domain::guidance::GuidanceRequest;
use descarte_core::packaging::{PackagingTaxonomy, PackagingType, TypeInput};
use descarte_core::prompt::GuidanceRequestBuilder;
use tracing::{debug, info};

pub const WELCOME: &str =
    "Bem-vindo ao sistema de destinação de embalagens! Digite as informações ou 'sair' para encerrar.";
pub const TYPE_PROMPT: &str = "Digite o tipo de embalagem (ex., Plástica, Metálica): ";
pub const WASHABLE_PROMPT: &str = "A embalagem é lavável? (sim/não/não sei): ";
pub const HAZARD_PROMPT: &str = "A embalagem contém resíduos perigosos? (sim/não/não sei): ";
pub const UNKNOWN_TYPE: &str = "Erro: Tipo de embalagem não reconhecido pela legislação. Tente novamente.";
pub const FAREWELL: &str = "Encerrando a conversa. Até logo!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    CollectType,
    CollectWashable { packaging_type: PackagingType },
    CollectHazard { packaging_type: PackagingType, is_washable: bool },
    RequestGuidance(GuidanceRequest),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub completed: usize,
    pub failed: usize,
}

pub struct Session<C> {
    taxonomy: PackagingTaxonomy,
    classifier: AnswerClassifier,
    builder: GuidanceRequestBuilder,
    guard: GuidanceGuard<C>,
}

impl<C> Session<C>
where
    C: LlmClient,
{
    pub fn new(guard: GuidanceGuard<C>) -> Self {
        Self::with_components(PackagingTaxonomy::default(), AnswerClassifier::default(), guard)
    }

    pub fn with_components(
        taxonomy: PackagingTaxonomy,
        classifier: AnswerClassifier,
        guard: GuidanceGuard<C>,
    ) -> Self {
        let builder = GuidanceRequestBuilder::new(taxonomy.clone(), guard.schema().clone());
        Self { taxonomy, classifier, builder, guard }
    }

    /// Runs until `sair` at the type prompt or end of input.
    pub async fn run<R, W>(&self, mut input: R, mut output: W) -> io::Result<SessionSummary>
    where
        R: BufRead,
        W: Write,
    {
        let mut summary = SessionSummary::default();
        let mut step = Step::CollectType;
        info!(event_name = "cli.session.started", "interactive session started");
        writeln!(output, "{WELCOME}")?;

        loop {
            step = match step {
                Step::CollectType => {
                    let Some(line) = read_answer(&mut input, &mut output, TYPE_PROMPT)? else {
                        break;
                    };
                    match self.taxonomy.read(&line) {
                        TypeInput::Exit => break,
                        TypeInput::Valid(packaging_type) => {
                            Step::CollectWashable { packaging_type }
                        }
                        TypeInput::Invalid => {
                            if self.classifier.vocabulary().is_vague(&line) {
                                writeln!(
                                    output,
                                    "\n{}\n",
                                    AnswerContext::PackagingType.clarification()
                                )?;
                            } else {
                                writeln!(output, "\n{UNKNOWN_TYPE}\n")?;
                            }
                            debug!(
                                event_name = "cli.session.type_rejected",
                                input_len = line.len(),
                                "packaging type not in taxonomy"
                            );
                            Step::CollectType
                        }
                    }
                }
                Step::CollectWashable { packaging_type } => {
                    let asked =
                        self.ask(&mut input, &mut output, WASHABLE_PROMPT, AnswerContext::Washability)?;
                    match asked {
                        Asked::Eof => break,
                        Asked::Again => step,
                        Asked::Answer(is_washable) => {
                            Step::CollectHazard { packaging_type, is_washable }
                        }
                    }
                }
                Step::CollectHazard { packaging_type, is_washable } => {
                    let asked =
                        self.ask(&mut input, &mut output, HAZARD_PROMPT, AnswerContext::Hazard)?;
                    match asked {
                        Asked::Eof => break,
                        Asked::Again => step,
                        Asked::Answer(has_hazardous_residue) => {
                            Step::RequestGuidance(GuidanceRequest {
                                packaging_type,
                                is_washable,
                                has_hazardous_residue,
                            })
                        }
                    }
                }
                Step::RequestGuidance(request) => {
                    let prompt = self.builder.build(&request);
                    match self.guard.submit(&prompt).await {
                        Ok(record) => {
                            summary.completed += 1;
                            writeln!(output, "\n{}\n", record.render())?;
                        }
                        Err(error) => {
                            summary.failed += 1;
                            writeln!(output, "\n{}\n", error.user_line())?;
                        }
                    }
                    Step::CollectType
                }
            };
        }

        writeln!(output, "{FAREWELL}")?;
        output.flush()?;
        info!(
            event_name = "cli.session.ended",
            completed = summary.completed,
            failed = summary.failed,
            "interactive session ended"
        );
        Ok(summary)
    }

    fn ask<R, W>(
        &self,
        input: &mut R,
        output: &mut W,
        prompt: &str,
        context: AnswerContext,
    ) -> io::Result<Asked>
    where
        R: BufRead,
        W: Write,
    {
        let Some(line) = read_answer(input, output, prompt)? else {
            return Ok(Asked::Eof);
        };
        match self.classifier.classify(&line, context) {
            TriStateAnswer::Undetermined { clarification } => {
                writeln!(output, "\n{clarification}")?;
                Ok(Asked::Again)
            }
            TriStateAnswer::Yes => Ok(Asked::Answer(true)),
            TriStateAnswer::No => Ok(Asked::Answer(false)),
        }
    }
}

enum Asked {
    Answer(bool),
    Again,
    Eof,
}

/// Print the prompt and read one line. `None` at end of input.
///
/// Bytes that are not UTF-8 are replaced, so the line is then rejected as an
/// unknown type or read as "no" instead of ending the session.
fn read_answer<R, W>(input: &mut R, output: &mut W, prompt: &str) -> io::Result<Option<String>>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        writeln!(output)?;
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&buf);
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}
