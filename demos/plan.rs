use dragon_mapper::{PlanBuilder, Policy};

fn main() -> Result<(), dragon_mapper::Error> {
    let plan = PlanBuilder::new()
        .with_catalog_file("demos/catalog.toml", true)
        .with_catalog_file("demos/local.toml", false)
        .with_policy(Policy::new("null_handling", "skip"))
        .build()?;

    for model in plan.models() {
        println!("{} -> {}", model.source_type(), model.destination_type());
        for route in model.routes() {
            println!(
                "  {:<24} <- {:<16} ({:?})",
                route.destination().name(),
                route.source_path(),
                route.route_type()
            );
        }
    }

    Ok(())
}
