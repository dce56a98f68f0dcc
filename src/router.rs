use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{CommandDefaults, Config};
use crate::domain::{DispatchResult, Intent, RouteKind};
use crate::handlers::{account, chain, guide, modal, HandlerContext};
use crate::hooks::{parse_hook_command, HookName};
use crate::intent::{classify, route_user_intent};
use crate::journal::QueryJournal;
use crate::rpc::ChainReader;
use crate::wallet::WalletSigner;

/// Turns one free-text command into a text reply or a modal payload.
///
/// Holds no per-command state; concurrent calls are independent.
pub struct Interpreter {
    defaults: CommandDefaults,
    reader: Arc<dyn ChainReader>,
    tz: String,
    journal: Option<QueryJournal>,
}

impl Interpreter {
    pub fn new(defaults: CommandDefaults, reader: Arc<dyn ChainReader>, tz: impl Into<String>) -> Self {
        Self {
            defaults,
            reader,
            tz: tz.into(),
            journal: None,
        }
    }

    pub fn from_config(cfg: &Config, reader: Arc<dyn ChainReader>) -> Self {
        let mut interpreter = Self::new(cfg.defaults.clone(), reader, cfg.tz.clone());
        if let Some(path) = cfg.query_log_path.as_deref() {
            interpreter = interpreter.with_journal(QueryJournal::new(path));
        }
        interpreter
    }

    pub fn with_journal(mut self, journal: QueryJournal) -> Self {
        self.journal = Some(journal);
        self
    }

    /// Hook clause, then the three-way router, then the 11-way classifier.
    /// Always returns a displayable string: plain text or `{type, data}` JSON.
    pub async fn classify_and_dispatch(
        &self,
        command: &str,
        signer: Option<&dyn WalletSigner>,
    ) -> String {
        let parsed = parse_hook_command(command);
        let clean = parsed.clean_command.as_str();

        let routed = route_user_intent(clean);
        let intent = match routed.kind {
            RouteKind::Liquidity => Intent::Liquidity,
            RouteKind::Swap => Intent::Swap,
            RouteKind::Chat => classify(clean),
        };
        info!(
            route = ?routed.kind,
            %intent,
            hook = ?parsed.hook_name,
            tokens = ?routed.tokens,
            "router.classify"
        );

        let result = self.dispatch(intent, clean, parsed.hook_name, signer).await;
        self.finish(command, intent, parsed.hook_name, result)
    }

    /// Entry point for callers that already hold an intent label, e.g. from
    /// the chat endpoint. `bridge` is served by the swap flow.
    pub async fn handle_agent_command(
        &self,
        command: &str,
        label: &str,
        signer: Option<&dyn WalletSigner>,
    ) -> String {
        let Some(intent) = Intent::from_label(label) else {
            warn!(label, "agent.unknown_label");
            return format!("Unknown command: \"{command}\".");
        };
        let parsed = parse_hook_command(command);
        let result = self
            .dispatch(intent, &parsed.clean_command, parsed.hook_name, signer)
            .await;
        self.finish(command, intent, parsed.hook_name, result)
    }

    /// Runs the handler for `intent`. Collaborator failures come back as
    /// advisory text, never as an error.
    pub async fn dispatch(
        &self,
        intent: Intent,
        command: &str,
        hook: Option<HookName>,
        signer: Option<&dyn WalletSigner>,
    ) -> DispatchResult {
        let ctx = HandlerContext {
            defaults: &self.defaults,
            reader: self.reader.as_ref(),
            signer,
            hook,
            tz: &self.tz,
        };

        let outcome = match intent {
            Intent::Swap => modal::swap(&ctx, command).await,
            Intent::Liquidity => modal::liquidity(&ctx, command).await,
            Intent::Deploy => modal::deploy(&ctx, command).await,
            Intent::Hooks => account::hooks(&ctx, command).await,
            Intent::Agent => account::agent(&ctx, command).await,
            Intent::Transfer => account::transfer(&ctx, command).await,
            Intent::Interact => account::interact(&ctx, command).await,
            Intent::Explore => chain::explore(&ctx, command).await,
            Intent::Research => chain::research(&ctx, command).await,
            Intent::Understand => guide::understand(&ctx, command).await,
            Intent::Build => guide::build(&ctx, command).await,
            Intent::Default => Ok(guide::fallback(command)),
        };

        match outcome {
            Ok(result) => result,
            Err(e) => {
                warn!(%intent, error = %e, "dispatch.failed");
                DispatchResult::Text(failure_advisory(intent, &e))
            }
        }
    }

    fn finish(
        &self,
        command: &str,
        intent: Intent,
        hook: Option<HookName>,
        result: DispatchResult,
    ) -> String {
        if let Some(journal) = &self.journal {
            if let Err(e) = journal.append(command, intent, hook, result.kind()) {
                warn!(path = %journal.path().display(), error = %e, "journal.append_failed");
            }
        }
        debug!(result_type = result.kind(), "command.done");

        match result.into_wire() {
            Ok(wire) => wire,
            Err(e) => {
                warn!(%intent, error = %e, "dispatch.encode_failed");
                failure_advisory(intent, &e)
            }
        }
    }
}

fn failure_advisory(intent: Intent, error: &anyhow::Error) -> String {
    format!(
        "❌ {} request failed: {error}. Please make sure you're connected to Base Sepolia and try again.",
        capitalize(intent.as_str())
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
