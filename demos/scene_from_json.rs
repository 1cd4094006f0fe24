use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/data/tooltip_scene.json"));

    let scene = floatpos::Scene::from_path(&path)?;
    scene.validate()?;
    let result = scene.compute()?;

    eprintln!(
        "{}: [{}] -> {} at ({}, {})",
        path.display(),
        scene.middleware_names().join(", "),
        result.placement,
        result.x,
        result.y
    );
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
