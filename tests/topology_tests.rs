#[cfg(test)]
mod topology_tests {
    use std::collections::{BTreeSet, HashSet};

    use labtopo::config::{RouterConfig, SegmentConfig, TopologyConfig, TransitConfig};
    use labtopo::export::{render, Format};
    use labtopo::ip::{AddressPlanner, Ipv4Net};
    use labtopo::topology::{build, BuildError, Node};
    use labtopo::utils::validate_topology;

    fn segment(label: &str, switch: &str, subnet: &str, hosts: u32, prefix: &str, router: &str) -> SegmentConfig {
        SegmentConfig {
            label: label.to_string(),
            switch: switch.to_string(),
            subnet: subnet.parse().unwrap(),
            hosts,
            host_prefix: prefix.to_string(),
            router: router.to_string(),
            interface: None,
        }
    }

    /// A layout in 10.20.0.0/16 with segments split unevenly between routers
    fn campus() -> TopologyConfig {
        TopologyConfig {
            name: "campus".to_string(),
            routers: vec![
                RouterConfig { name: "core".to_string() },
                RouterConfig { name: "edge".to_string() },
            ],
            transit: TransitConfig {
                subnet: "10.20.255.252/30".parse().unwrap(),
            },
            segments: vec![
                segment("labs", "sw-labs", "10.20.0.0/24", 200, "lab", "core"),
                segment("staff", "sw-staff", "10.20.1.0/26", 40, "st", "edge"),
                segment("guests", "sw-guest", "10.20.2.0/23", 300, "g", "edge"),
                segment("printers", "sw-prn", "10.20.4.0/29", 5, "p", "edge"),
            ],
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        for config in [TopologyConfig::default(), campus()] {
            let first = render(&build(&config).unwrap(), Format::Json).unwrap();
            let second = render(&build(&config).unwrap(), Format::Json).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_reference_layout_counts() {
        let topology = build(&TopologyConfig::default()).unwrap();
        let summary = topology.summary();

        assert_eq!(summary.hosts, 61 + 29 + 13 + 5);
        assert_eq!(summary.switches, 4);
        assert_eq!(summary.routers, 2);
        assert_eq!(summary.links, 108 + 4 + 1);
        assert!(validate_topology(&topology).is_ok());
    }

    #[test]
    fn test_first_segment_addresses() {
        let topology = build(&TopologyConfig::default()).unwrap();
        let addresses: Vec<String> = topology
            .hosts()
            .take(3)
            .map(|h| h.ip().to_string())
            .collect();
        assert_eq!(addresses, vec!["192.168.244.2/26", "192.168.244.3/26", "192.168.244.4/26"]);

        let r0 = topology.node("r0").and_then(Node::as_router).unwrap();
        assert_eq!(r0.interfaces()[0].address().to_string(), "192.168.244.1/26");
    }

    #[test]
    fn test_slash_28_capacity_boundary() {
        let mut config = TopologyConfig::default();
        config.segments[2].hosts = 13;
        assert!(build(&config).is_ok());

        config.segments[2].hosts = 14;
        match build(&config) {
            Err(BuildError::Capacity { segment, subnet, requested, capacity }) => {
                assert_eq!(segment, "spesialis");
                assert_eq!(subnet.to_string(), "192.168.244.96/28");
                assert_eq!(requested, 14);
                assert_eq!(capacity, 13);
            }
            other => panic!("expected a capacity error, got {:?}", other.map(|t| t.summary())),
        }
    }

    #[test]
    fn test_capacity_matches_planner_for_every_prefix() {
        for prefix in 8u8..=30 {
            let subnet = Ipv4Net::new("10.0.0.0".parse().unwrap(), prefix).unwrap();
            let planner = AddressPlanner::new(subnet).unwrap();
            assert_eq!(planner.capacity(), (1u64 << (32 - prefix)) - 3);
            assert!(planner.hosts(planner.capacity()).is_ok());
            assert!(planner.hosts(planner.capacity() + 1).is_err());
        }
    }

    #[test]
    fn test_hosts_share_network_with_gateway() {
        for config in [TopologyConfig::default(), campus()] {
            let topology = build(&config).unwrap();
            for host in topology.hosts() {
                assert!(
                    host.ip().contains(&host.default_route()),
                    "{} {} vs {}",
                    host.name(),
                    host.ip(),
                    host.default_route()
                );
            }
        }
    }

    #[test]
    fn test_router_interfaces_match_terminated_segments() {
        let config = campus();
        let topology = build(&config).unwrap();

        for (idx, router_config) in config.routers.iter().enumerate() {
            let router = topology.node(&router_config.name).and_then(Node::as_router).unwrap();
            let actual: BTreeSet<String> = router
                .interfaces()
                .iter()
                .map(|i| i.address().to_string())
                .collect();

            let mut expected: BTreeSet<String> = config
                .segments
                .iter()
                .filter(|s| s.router == router_config.name)
                .map(|s| AddressPlanner::new(s.subnet).unwrap().gateway().to_string())
                .collect();
            let transit = AddressPlanner::new(config.transit.subnet).unwrap();
            let transit_addr = transit.address(idx as u64).unwrap();
            expected.insert(transit_addr.to_string());

            assert_eq!(actual, expected, "router {}", router_config.name);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let topology = build(&campus()).unwrap();

        let mut nodes = HashSet::new();
        for node in topology.nodes() {
            assert!(nodes.insert(node.name()), "duplicate node {}", node.name());
        }
        for router in topology.routers() {
            let mut interfaces = HashSet::new();
            for interface in router.interfaces() {
                assert!(interfaces.insert(interface.name()));
            }
        }
    }

    #[test]
    fn test_campus_layout() {
        let topology = build(&campus()).unwrap();
        let summary = topology.summary();
        assert_eq!(summary.hosts, 545);
        assert_eq!(summary.links, 545 + 4 + 1);

        let edge = topology.node("edge").and_then(Node::as_router).unwrap();
        let names: Vec<&str> = edge.interfaces().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["edge-eth1", "edge-eth2", "edge-eth3", "edge-eth4"]);
        assert_eq!(topology.node("edge").and_then(Node::ip).unwrap().to_string(), "10.20.1.1/26");

        // Host 255 of the /23 crosses into the second /24 of the block
        let g255 = topology.node("g255").and_then(Node::as_host).unwrap();
        assert_eq!(g255.ip().to_string(), "10.20.3.0/23");
        assert_eq!(g255.default_route().to_string(), "10.20.2.1");

        let transit = topology.links().iter().find(|l| l.connects("core", "edge")).unwrap();
        assert_eq!(transit.a().address().unwrap().to_string(), "10.20.255.253/30");
        assert_eq!(transit.b().address().unwrap().to_string(), "10.20.255.254/30");
        assert_eq!(transit.a().interface(), Some("core-eth2"));
        assert_eq!(transit.b().interface(), Some("edge-eth4"));
    }

    #[test]
    fn test_failed_build_returns_only_an_error() {
        let mut config = campus();
        config.segments[3].hosts = 6;
        let result = build(&config);
        assert!(matches!(result, Err(BuildError::Capacity { ref segment, .. }) if segment == "printers"));
    }
}
