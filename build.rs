use std::error::Error;

// Emits VERGEN_GIT_SHA for `buildmatrix --version`. Outside a git checkout
// vergen falls back to a placeholder value instead of failing.
fn main() -> Result<(), Box<dyn Error>> {
    let git = vergen_gitcl::GitclBuilder::default()
        .sha(true)
        .dirty(true)
        .build()?;

    vergen_gitcl::Emitter::default()
        .add_instructions(&git)?
        .emit()?;
    Ok(())
}
