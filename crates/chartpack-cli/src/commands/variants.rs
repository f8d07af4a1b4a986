//! Variants command - list the chart variants that can be built

use chartpack_core::CATALOG;
use console::style;

pub fn run() {
    println!("{}", style("Chart variants").cyan().bold());
    for info in CATALOG {
        println!(
            "  {:<12} {:<12} classifier={} source=META-INF/fabric8/{}",
            style(info.id).bold(),
            info.description,
            info.classifier,
            info.source_dir
        );
    }
}
