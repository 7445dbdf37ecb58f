use crate::config::Rsa;
use crate::invocation::Invocation;
use crate::layout::ProjectLayout;
use crate::runner::{Executor, run_sequence};
use anyhow::{Context, Result};
use tracing::info;

/// `openssl genrsa` for the private key, then `openssl rsa -pubout` for the public key.
pub fn rsa_invocations(rsa: &Rsa, layout: &ProjectLayout) -> Vec<Invocation> {
    let private_key = layout.rsa_private_key().display().to_string();
    let public_key = layout.rsa_public_key().display().to_string();

    vec![
        Invocation::new(&rsa.program)
            .args(["genrsa", "-out"])
            .arg(&private_key)
            .arg(rsa.key_bits.to_string()),
        Invocation::new(&rsa.program)
            .args(["rsa", "-in"])
            .arg(private_key)
            .args(["-pubout", "-out"])
            .arg(public_key),
    ]
}

pub async fn cmd_rsa<E: Executor>(rsa: &Rsa, layout: &ProjectLayout, executor: &E) -> Result<()> {
    std::fs::create_dir_all(&layout.rsa_dir).with_context(|| {
        format!(
            "Failed to create key directory {}",
            layout.rsa_dir.display()
        )
    })?;

    run_sequence(executor, &rsa_invocations(rsa, layout)).await?;

    info!("Private key: {}", layout.rsa_private_key().display());
    info!("Public key: {}", layout.rsa_public_key().display());
    Ok(())
}
