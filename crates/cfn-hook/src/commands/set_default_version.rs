//! Set-default-version command

use anyhow::{Context, Result};
use cfn_hook_core::types::pad_version_id;
use cfn_hook_registry::HookRegistry;
use tracing::info;

use super::CommandContext;
use crate::cli::SetDefaultVersionArgs;

pub async fn run(args: SetDefaultVersionArgs, ctx: &CommandContext) -> Result<()> {
    let type_name = ctx.hook_type_name()?;
    let registry = ctx.registry().await?;

    set_default_version(&registry, &type_name, &args.version_id).await
}

/// Make a version the default; prints nothing on success
pub(crate) async fn set_default_version(
    registry: &dyn HookRegistry,
    type_name: &str,
    version_id: &str,
) -> Result<()> {
    let version_id = pad_version_id(version_id);
    registry
        .set_type_default_version(type_name, &version_id)
        .await
        .with_context(|| {
            format!(
                "Failed to set the default version of {} to {}",
                type_name, version_id
            )
        })?;
    info!("{} default version is now {}", type_name, version_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::{Call, FakeRegistry};
    use cfn_hook_core::types::HookTypeDescription;
    use cfn_hook_core::Error;

    fn registry() -> FakeRegistry {
        FakeRegistry::new("us-east-1")
            .with_version("00000001", HookTypeDescription::default())
            .with_version("00000002", HookTypeDescription::default())
    }

    #[tokio::test]
    async fn test_pads_version_and_makes_one_call() {
        let registry = registry();
        set_default_version(&registry, "Random::Type::Name", "2")
            .await
            .unwrap();
        assert_eq!(
            registry.calls(),
            vec![Call::SetTypeDefaultVersion("00000002".to_string())]
        );
    }

    #[tokio::test]
    async fn test_unknown_version_is_not_found() {
        let registry = registry();
        let err = set_default_version(&registry, "Random::Type::Name", "7")
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::NotFound { .. })
        ));
        assert!(format!("{:#}", err).contains("00000007"));
    }
}
