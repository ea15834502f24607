use fibre_forge::{CrosslinkConfig, DomainConfig, GenerationConfig, PlacementConfig, StrandsConfig};

use crate::cli::{CrosslinkOptions, DirectedArgs, DomainOptions, RandomArgs, StrandOptions};

pub fn build_random_config(args: &RandomArgs) -> GenerationConfig {
    GenerationConfig {
        seed: args.strands.seed,
        domain: build_domain_config(&args.domain),
        strands: build_strands_config(&args.strands),
        placement: PlacementConfig::Uniform,
        crosslink: build_crosslink_config(&args.crosslink),
    }
}

pub fn build_directed_config(args: &DirectedArgs) -> GenerationConfig {
    GenerationConfig {
        seed: args.strands.seed,
        domain: build_domain_config(&args.domain),
        strands: build_strands_config(&args.strands),
        placement: PlacementConfig::Directional {
            mean_angle: args.mean_angle.to_radians(),
            concentration: args.concentration,
        },
        crosslink: build_crosslink_config(&args.crosslink),
    }
}

fn build_domain_config(opts: &DomainOptions) -> DomainConfig {
    DomainConfig {
        size_x: opts.size_x,
        size_y: opts.size_y,
        fix_boundary: opts.fix_boundary,
        fix_north: opts.fix_north,
        fix_south: opts.fix_south,
        fix_east: opts.fix_east,
        fix_west: opts.fix_west,
    }
}

fn build_strands_config(opts: &StrandOptions) -> StrandsConfig {
    StrandsConfig {
        beads_per_strand: opts.beads_per_strand,
        strand_count: opts.strand_count,
        contour_length: opts.contour_length,
    }
}

fn build_crosslink_config(opts: &CrosslinkOptions) -> CrosslinkConfig {
    if opts.no_crosslinks {
        return CrosslinkConfig::None;
    }
    CrosslinkConfig::Density {
        max_radius: opts.max_radius,
        max_candidates: opts.max_candidates,
        bin_size: opts.bin_size,
        spring_constant: opts.spring_constant,
    }
}
