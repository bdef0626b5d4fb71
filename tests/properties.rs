//! Property-based tests for the storage and thermal invariants.
//!
//! Random sequences of fills and drains must never break capacity, density
//! ordering, or conservation of fluid. Thermal ticks must converge on their
//! target without overshoot and only gain or lose energy through the shell.

use proptest::prelude::*;

use fractional_tanks::models::storage::fractional_tank::FractionalTank;
use fractional_tanks::models::thermal::thermal_tank::ThermalTank;
use fractional_tanks::support::fluid::{End, FluidAction, FluidStack, StratifiedFluid};
use uom::si::{
    f64::{MassDensity, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    thermodynamic_temperature::kelvin,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Fluid {
    Mercury,
    Brine,
    Water,
    Ethanol,
    Kerosene,
}

impl StratifiedFluid for Fluid {
    fn density(&self) -> MassDensity {
        let value = match self {
            Self::Mercury => 13_534.0,
            Self::Brine => 1_200.0,
            Self::Water => 1_000.0,
            // Shares a density with kerosene on purpose.
            Self::Ethanol | Self::Kerosene => 800.0,
        };
        MassDensity::new::<kilogram_per_cubic_meter>(value)
    }

    fn temperature(&self) -> ThermodynamicTemperature {
        let value = match self {
            Self::Mercury => 350.0,
            Self::Brine => 270.0,
            Self::Water | Self::Kerosene => 300.0,
            Self::Ethanol => 320.0,
        };
        ThermodynamicTemperature::new::<kelvin>(value)
    }
}

#[derive(Debug, Clone)]
enum Op {
    Fill(Fluid, u32, End),
    Drain(u32, End),
    DrainFluid(Fluid, u32),
    ViewFill(usize, End, Fluid, u32),
    ViewDrain(usize, End, u32),
}

const CAPACITIES: [u32; 3] = [500, 300, 1000];

fn fluid() -> impl Strategy<Value = Fluid> {
    prop_oneof![
        Just(Fluid::Mercury),
        Just(Fluid::Brine),
        Just(Fluid::Water),
        Just(Fluid::Ethanol),
        Just(Fluid::Kerosene),
    ]
}

fn end() -> impl Strategy<Value = End> {
    prop_oneof![Just(End::Bottom), Just(End::Top)]
}

fn action() -> impl Strategy<Value = FluidAction> {
    prop_oneof![Just(FluidAction::Simulate), Just(FluidAction::Execute)]
}

fn op() -> impl Strategy<Value = Op> {
    let amount = 0..700_u32;
    let compartment = 0..CAPACITIES.len();
    prop_oneof![
        (fluid(), amount.clone(), end()).prop_map(|(f, a, e)| Op::Fill(f, a, e)),
        (amount.clone(), end()).prop_map(|(a, e)| Op::Drain(a, e)),
        (fluid(), amount.clone()).prop_map(|(f, a)| Op::DrainFluid(f, a)),
        (compartment.clone(), end(), fluid(), amount.clone())
            .prop_map(|(c, e, f, a)| Op::ViewFill(c, e, f, a)),
        (compartment, end(), amount).prop_map(|(c, e, a)| Op::ViewDrain(c, e, a)),
    ]
}

fn total(tank: &FractionalTank<Fluid>) -> u32 {
    tank.compartments().map(|c| c.amount()).sum()
}

/// Applies `op` and returns the signed change in fluid it reports.
fn apply(tank: &mut FractionalTank<Fluid>, op: &Op, action: FluidAction) -> (i64, u32) {
    match *op {
        Op::Fill(fluid, amount, end) => {
            let accepted = tank.fill(&FluidStack::new(fluid, amount), end, action);
            (i64::from(accepted), amount)
        }
        Op::Drain(amount, end) => {
            let drained = tank.drain(amount, end, action);
            (-i64::from(drained.amount()), amount)
        }
        Op::DrainFluid(fluid, amount) => {
            let drained = tank.drain_fluid(&FluidStack::new(fluid, amount), action);
            assert!(drained.stacks().iter().all(|stack| stack.fluid == fluid));
            (-i64::from(drained.amount()), amount)
        }
        Op::ViewFill(index, end, fluid, amount) => {
            let mut view = tank.access(index, end).expect("index in range");
            let accepted = view.fill(&FluidStack::new(fluid, amount), action);
            (i64::from(accepted), amount)
        }
        Op::ViewDrain(index, end, amount) => {
            let mut view = tank.access(index, end).expect("index in range");
            let drained = view.drain(amount, action);
            (-i64::from(drained.amount()), amount)
        }
    }
}

fn assert_stratified(tank: &FractionalTank<Fluid>) {
    for compartment in tank.compartments() {
        assert!(compartment.amount() <= compartment.capacity());
        assert!(compartment.layers().iter().all(|layer| layer.amount > 0));
        for pair in compartment.layers().windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            assert!(lower.fluid.density() >= upper.fluid.density());
            assert_ne!(lower.fluid, upper.fluid);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn storage_invariants_hold(ops in prop::collection::vec((op(), action()), 1..60)) {
        let mut tank = FractionalTank::<Fluid>::new(CAPACITIES.len(), &CAPACITIES).unwrap();

        for (op, action) in &ops {
            let before = total(&tank);
            let mut simulated = tank.clone();
            let (predicted, _) = apply(&mut simulated, op, FluidAction::Simulate);
            prop_assert_eq!(total(&simulated), before);

            let (change, requested) = apply(&mut tank, op, *action);
            prop_assert!(change.unsigned_abs() <= u64::from(requested));
            prop_assert_eq!(change, predicted);

            let expected = match action {
                FluidAction::Simulate => i64::from(before),
                FluidAction::Execute => i64::from(before) + change,
            };
            prop_assert_eq!(i64::from(total(&tank)), expected);
            assert_stratified(&tank);
        }
    }

    #[test]
    fn drains_never_exceed_what_is_held(
        fills in prop::collection::vec((fluid(), 1..400_u32), 1..10),
        amount in 0..3000_u32,
        end in end(),
    ) {
        let mut tank = FractionalTank::<Fluid>::new(CAPACITIES.len(), &CAPACITIES).unwrap();
        for (fluid, amount) in fills {
            tank.fill(&FluidStack::new(fluid, amount), End::Top, FluidAction::Execute);
        }

        let held = total(&tank);
        let drained = tank.drain(amount, end, FluidAction::Execute);
        prop_assert_eq!(drained.amount(), amount.min(held));
        prop_assert_eq!(total(&tank), held - drained.amount());
    }

    #[test]
    fn drain_from_an_end_takes_a_contiguous_run(
        fills in prop::collection::vec((fluid(), 1..200_u32), 1..8),
        amount in 1..1000_u32,
        end in end(),
    ) {
        let mut tank = FractionalTank::<Fluid>::new(1, &[1000]).unwrap();
        for (fluid, amount) in fills {
            tank.fill(&FluidStack::new(fluid, amount), End::Top, FluidAction::Execute);
        }
        let mut layers = tank.contents(0).unwrap().to_vec();
        if end == End::Top {
            layers.reverse();
        }

        let drained = tank.drain(amount, end, FluidAction::Execute);
        // Every layer drained before the last one was taken whole, in order.
        let stacks = drained.stacks();
        for (index, stack) in stacks.iter().enumerate() {
            prop_assert_eq!(stack.fluid, layers[index].fluid);
            if index + 1 < stacks.len() {
                prop_assert_eq!(stack.amount, layers[index].amount);
            }
        }
    }

    #[test]
    fn fill_then_drain_round_trips(fluid in fluid(), amount in 1..=1000_u32) {
        let mut tank = FractionalTank::<Fluid>::new(1, &[1000]).unwrap();
        prop_assert_eq!(tank.fill(&FluidStack::new(fluid, amount), End::Bottom, FluidAction::Execute), amount);

        let drained = tank.drain_fluid(&FluidStack::new(fluid, amount), FluidAction::Execute);
        prop_assert_eq!(drained.amount_of(&fluid), amount);
        prop_assert!(tank.compartment(0).unwrap().is_empty());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn empty_shell_converges_without_overshoot(
        capacity in 100..5000_u32,
        conductivity in 1..20_u32,
        target in 200..400_i32,
    ) {
        let mut tank = ThermalTank::<Fluid>::new(1, &[capacity], &[conductivity]).unwrap();
        tank.set_target_temperature(0, target).unwrap();

        let mut previous = tank.shell_temperature(0).unwrap();
        let mut ticks = 0;
        while previous != target {
            tank.tick();
            let current = tank.shell_temperature(0).unwrap();
            if target > 300 {
                prop_assert!(previous <= current && current <= target);
            } else {
                prop_assert!(previous >= current && current >= target);
            }
            previous = current;
            ticks += 1;
            prop_assert!(ticks < 200_000);
        }
        for _ in 0..20 {
            tank.tick();
            prop_assert_eq!(tank.shell_temperature(0).unwrap(), target);
        }
    }

    #[test]
    fn only_the_surroundings_change_total_energy(
        fills in prop::collection::vec((fluid(), 50..400_u32), 1..10),
        conductivities in prop::collection::vec(1..10_u32, 2),
        targets in prop::collection::vec(250..350_i32, 2),
        ticks in 1..100_usize,
    ) {
        // Everything fits in the first compartment, so no layer is a sliver.
        let mut tank = ThermalTank::<Fluid>::new(2, &[4000, 2000], &conductivities).unwrap();
        for (index, target) in targets.into_iter().enumerate() {
            tank.set_target_temperature(index, target).unwrap();
        }
        for (fluid, amount) in fills {
            tank.fill(&FluidStack::new(fluid, amount), End::Top, FluidAction::Execute);
        }

        let energy = |tank: &ThermalTank<Fluid>| -> i64 {
            (0..tank.compartment_count())
                .map(|index| {
                    let fluids: i64 = tank
                        .tank()
                        .contents(index)
                        .unwrap()
                        .iter()
                        .map(|layer| tank.fluid_energy(index, &layer.fluid).unwrap())
                        .sum();
                    tank.shell_energy(index).unwrap() + fluids
                })
                .sum()
        };

        let mut injected = 0;
        for _ in 0..ticks {
            injected += tank.tick().external_energy;
            prop_assert_eq!(energy(&tank), injected);
        }
    }

    #[test]
    fn every_layer_has_a_temperature(ops in prop::collection::vec(op(), 1..40)) {
        let mut tank = ThermalTank::<Fluid>::new(CAPACITIES.len(), &CAPACITIES, &[]).unwrap();

        for op in &ops {
            match *op {
                Op::Fill(fluid, amount, end) => {
                    tank.fill(&FluidStack::new(fluid, amount), end, FluidAction::Execute);
                }
                Op::Drain(amount, end) => {
                    tank.drain(amount, end, FluidAction::Execute);
                }
                Op::DrainFluid(fluid, amount) => {
                    tank.drain_fluid(&FluidStack::new(fluid, amount), FluidAction::Execute);
                }
                Op::ViewFill(index, end, fluid, amount) => {
                    let mut view = tank.access(index, end).unwrap();
                    view.fill(&FluidStack::new(fluid, amount), FluidAction::Execute);
                }
                Op::ViewDrain(index, end, amount) => {
                    let mut view = tank.access(index, end).unwrap();
                    view.drain(amount, FluidAction::Execute);
                }
            }
            tank.tick();

            for index in 0..tank.compartment_count() {
                let report = tank.report(index).unwrap();
                prop_assert_eq!(report.layers.len(), tank.tank().contents(index).unwrap().len());
                for layer in &report.layers {
                    prop_assert!(tank.fluid_temperature(index, &layer.stack.fluid).is_ok());
                }
            }
        }
    }
}
