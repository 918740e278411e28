//! Parameter listing command.

use clap::Args;

use dueto_core::{ParamScale, ParameterInfo};
use dueto_eq::EqParams;

#[derive(Args)]
pub struct ParamsArgs {
    /// Show normalized control positions for the defaults
    #[arg(long)]
    normalized: bool,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let params = EqParams::new();

    println!("EQ Parameters");
    println!(
        "  {:<10} {:<18} {:>10} {:>10} {:>10}  scale",
        "key", "name", "min", "max", "default"
    );
    for i in 0..params.param_count() {
        let Some(desc) = params.param_info(i) else {
            continue;
        };
        let scale = match desc.scale {
            ParamScale::Linear => "linear",
            ParamScale::Logarithmic => "log",
            ParamScale::Power(_) => "power",
        };
        println!(
            "  {:<10} {:<18} {:>10} {:>10} {:>10}  {}",
            desc.key,
            desc.name,
            format!("{}{}", desc.min, desc.unit.suffix()),
            format!("{}{}", desc.max, desc.unit.suffix()),
            format!("{}{}", desc.default, desc.unit.suffix()),
            scale,
        );
        if args.normalized {
            println!(
                "  {:<10} default at control position {:.3}",
                "", desc.normalize(desc.default)
            );
        }
    }
    Ok(())
}
