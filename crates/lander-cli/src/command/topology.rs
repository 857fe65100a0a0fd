use anyhow::Context as _;
use lander_autopilot::{DEFAULT_HIDDEN_LAYERS, INPUT_SIZE, OUTPUT_SIZE};
use lander_brain::Topology;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TopologyArg {
    /// Hidden layer sizes, comma separated
    #[arg(long, value_delimiter = ',')]
    hidden: Vec<usize>,
}

pub(crate) fn run(arg: &TopologyArg) -> anyhow::Result<()> {
    let hidden = if arg.hidden.is_empty() {
        DEFAULT_HIDDEN_LAYERS.to_vec()
    } else {
        arg.hidden.clone()
    };
    let topology =
        Topology::new(INPUT_SIZE, hidden, OUTPUT_SIZE).context("Invalid network topology")?;

    println!(
        "{} inputs -> {:?} -> {} outputs",
        topology.inputs(),
        topology.hidden(),
        topology.outputs()
    );
    let mut offset = 0;
    for (layer, &size) in topology.hidden().iter().enumerate() {
        let fan_in = topology.hidden_fan_in(layer);
        let len = size * fan_in;
        println!(
            "  hidden {layer}: {size:3} neurons x {fan_in:3} weights  genes {offset:5}..{:5}",
            offset + len
        );
        offset += len;
    }
    let fan_in = topology.output_fan_in();
    let len = topology.outputs() * fan_in;
    println!(
        "  output  : {:3} neurons x {fan_in:3} weights  genes {offset:5}..{:5}",
        topology.outputs(),
        offset + len
    );
    println!("  total genes: {}", topology.gene_len());
    Ok(())
}
