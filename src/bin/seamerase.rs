// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::convert::TryFrom;
use std::process;

use clap::{App, Arg, ArgMatches};
use failure::{format_err, Error};
use log::info;

use seamerase::annotate::HIGHLIGHT;
use seamerase::{
    compute_energy, draw_region_outline, draw_vertical_seams, energy_to_image, Region,
    RegionRemover, RemovalConfig,
};

fn coordinate_arg(name: &'static str, help: &'static str) -> Arg<'static, 'static> {
    Arg::with_name(name)
        .long(name)
        .help(help)
        .takes_value(true)
        .allow_hyphen_values(true)
        .required(true)
}

fn integer(matches: &ArgMatches, name: &str) -> Result<i64, Error> {
    let raw = matches
        .value_of(name)
        .ok_or_else(|| format_err!("missing --{}", name))?;
    raw.parse::<i64>()
        .map_err(|_| format_err!("--{} must be an integer, got {:?}", name, raw))
}

fn run() -> Result<(), Error> {
    let matches = App::new("seamerase")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Erase a rectangular region from an image by seam carving")
        .arg(
            Arg::with_name("input")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the carved image; the extension picks the format")
                .required(true)
                .index(2),
        )
        .arg(coordinate_arg("x", "Left edge of the region"))
        .arg(coordinate_arg("y", "Top edge of the region"))
        .arg(coordinate_arg("width", "Width of the region"))
        .arg(coordinate_arg("height", "Height of the region"))
        .arg(
            Arg::with_name("margin")
                .long("margin")
                .help("Seams to remove beyond the region's width")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("preview")
                .long("preview")
                .help("Also write the original with the region outlined")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("energy")
                .long("energy")
                .help("Also write the original image's energy map")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("seams")
                .long("seams")
                .help("Also write the original with every removed seam drawn in")
                .takes_value(true),
        )
        .get_matches();

    let region = Region::try_from((
        integer(&matches, "x")?,
        integer(&matches, "y")?,
        integer(&matches, "width")?,
        integer(&matches, "height")?,
    ))?;
    let mut config = RemovalConfig::default();
    if let Some(margin) = matches.value_of("margin") {
        config.margin = margin
            .parse()
            .map_err(|_| format_err!("--margin must be a non-negative integer, got {:?}", margin))?;
    }

    // `required` guarantees both positionals.
    let input = matches.value_of("input").unwrap_or_default();
    let output = matches.value_of("output").unwrap_or_default();

    let image = image::open(input)?.to_rgb8();
    info!("loaded {} ({}x{})", input, image.width(), image.height());
    region.validate(image.width(), image.height())?;

    if let Some(path) = matches.value_of("preview") {
        draw_region_outline(&image, region, HIGHLIGHT).save(path)?;
    }
    if let Some(path) = matches.value_of("energy") {
        energy_to_image(&compute_energy(&image)?).save(path)?;
    }

    let (carved, seams) = RegionRemover::new(&image)
        .with_config(config)
        .on_progress(|p| info!("{:.0}% carved", p.fraction() * 100.0))
        .remove_with_seams(region)?;

    if let Some(path) = matches.value_of("seams") {
        draw_vertical_seams(&image, &seams, HIGHLIGHT)?.save(path)?;
    }

    carved.save(output)?;
    info!("wrote {} ({}x{})", output, carved.width(), carved.height());
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("seamerase: {}", err);
        process::exit(1);
    }
}
