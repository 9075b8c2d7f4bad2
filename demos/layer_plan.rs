use traitmix::{Category, SelectedLayers, build_render_layers};

fn plan(label: &str, entries: &[(Category, &str)]) -> anyhow::Result<()> {
    let mut selection = SelectedLayers::default();
    for (category, source) in entries {
        selection.set(*category, *source);
    }
    let layers = build_render_layers(&selection);
    println!("== {label} ({} layers)", layers.len());
    println!("{}", serde_json::to_string_pretty(&layers)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    plan(
        "tattooed and masked",
        &[
            (Category::Base, "wojak_classic.png"),
            (Category::Eyes, "tyson_tattoo.png"),
            (Category::Mask, "surgical.png"),
        ],
    )?;

    plan(
        "knotted eye band",
        &[
            (Category::Base, "wojak_classic.png"),
            (Category::Mask, "ronin_band_.png"),
            (Category::Eyes, "sleepy.png"),
        ],
    )?;

    plan(
        "hooded pipe smoker",
        &[
            (Category::Base, "wojak_classic.png"),
            (Category::MouthItem, "briar_pipe.png"),
            (Category::Head, "hood_grey.png"),
        ],
    )?;

    Ok(())
}
