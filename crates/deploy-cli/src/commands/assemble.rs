//! Assemble command implementation

use deploy_core::{Assembler, Response, Settings, TriggerEvent};
use deploy_git::{CancelToken, Credential};

use crate::cli::AssembleArgs;
use crate::error::Result;

/// Acquire the repository, resolve its configuration and print the
/// response the webhook layer would send.
pub fn run_assemble(args: &AssembleArgs) -> Result<()> {
    let mut settings = Settings::from_env()?;
    if let Some(workdir) = &args.workdir {
        settings.workdir_root = workdir.clone();
    }
    tracing::debug!(?settings, "Loaded settings");

    let mut event = TriggerEvent::new(&args.repository, &args.clone_url, &args.reference)
        .with_tls_insecure(args.tls_insecure);
    if let (Some(auth_type), Some(token)) = (&args.auth_type, &args.token) {
        event = event.with_credential(Credential::new(auth_type, token));
    }

    let assembler = Assembler::new(&settings);
    match assembler.assemble(&event, &CancelToken::new()) {
        Ok(request) => {
            let response = Response::accepted(&request);
            if args.keep {
                let handoff = request.handoff();
                let response = response.with_details(handoff.working_copy_path.display().to_string());
                println!("{}", response.to_json()?);
            } else {
                println!("{}", response.to_json()?);
            }
            Ok(())
        }
        Err(e) => {
            println!("{}", Response::from_error(&e).to_json()?);
            Err(e.into())
        }
    }
}
