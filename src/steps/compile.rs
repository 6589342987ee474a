use crate::error::Result;
use crate::runner::Invocation;
use crate::steps::BuildContext;

/// Compiles the solution with the resolved version stamped in.
pub fn run(ctx: &mut BuildContext) -> Result<()> {
    let build = &ctx.config.build;
    let version = ctx.version;

    let mut invocation = Invocation::new(&build.compiler)
        .arg("build")
        .arg(&build.solution)
        .args(["-c", build.configuration.as_str()])
        .arg(format!("/p:Version={}", version.package_version))
        .arg(format!("/p:AssemblyVersion={}", version.assembly_version))
        .arg(format!("/p:FileVersion={}", version.file_version));

    for (key, value) in &build.properties {
        invocation = invocation.arg(format!("/p:{}={}", key, value));
    }

    ctx.run(invocation)
}
