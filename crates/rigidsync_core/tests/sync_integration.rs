//! Integration tests for the scene bridge
//!
//! These tests drive the full lifecycle through the public API:
//! 1. Bodies are derived from visual objects and start at their pose
//! 2. Compound bodies keep every part at its own offset
//! 3. Collision groups shape what the broad-phase considers
//! 4. The sync loop writes poses and prunes orphaned bodies

use rigidsync_core::{
    Geometry, Pose, Quat, Scene, Shape, Sphere, SyncError, Vec3, VisualKey, VisualObject, VisualScene,
    World, PLANE_HALF_THICKNESS,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn cube(size: f32) -> Geometry {
    Geometry::Box { width: size, height: size, depth: size }
}

fn crate_at(scene: &mut Scene, position: Vec3) -> VisualKey {
    scene.add(VisualObject::new(cube(1.0)).with_position(position))
}

// ==================== Body Creation Tests ====================

/// A body created from a visual starts exactly at the visual's pose
#[test]
fn test_body_starts_at_visual_pose() {
    init_logging();
    let mut scene = Scene::new();
    let pose = Pose::new(Vec3::new(3.0, 7.0, -1.0), Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.8));
    let visual = scene.add(
        VisualObject::new(cube(2.0))
            .with_position(pose.position)
            .with_orientation(pose.orientation),
    );
    let mut world = World::new(Vec3::new(0.0, -9.82, 0.0));

    let key = world.add_body(&scene, visual, 1.0, None).unwrap();

    let body = world.body(key).expect("Body should be registered");
    assert_eq!(body.position, pose.position);
    assert_eq!(body.orientation, pose.orientation);
}

/// Every supported geometry kind produces a body; unsupported kinds are surfaced
#[test]
fn test_every_geometry_kind() {
    init_logging();
    let mut scene = Scene::new();
    let mut world = World::new(Vec3::ZERO);

    let supported = [
        cube(1.0),
        Geometry::Sphere { radius: 1.0 },
        Geometry::Cylinder { radius_top: 1.0, radius_bottom: 1.0, height: 2.0, radial_segments: 16 },
        Geometry::Plane { width: 20.0, height: 20.0 },
    ];
    for geometry in supported {
        let visual = scene.add(VisualObject::new(geometry));
        assert!(world.add_body(&scene, visual, 0.0, None).is_ok());
    }
    assert_eq!(world.body_count(), 4);

    let mesh = scene.add(VisualObject::new(Geometry::Other { kind: "icosahedron".into() }));
    assert_eq!(
        world.add_body(&scene, mesh, 1.0, None),
        Err(SyncError::UnsupportedShapeKind("icosahedron".into()))
    );
    assert_eq!(world.body_count(), 4, "Failed creation must not register anything");
}

/// A ground plane visual becomes a thin static box
#[test]
fn test_ground_plane_is_thin_static_box() {
    let mut scene = Scene::new();
    let ground = scene.add(VisualObject::new(Geometry::Plane { width: 10.0, height: 6.0 }));
    let mut world = World::new(Vec3::new(0.0, -9.82, 0.0));

    let key = world.add_body(&scene, ground, 0.0, None).unwrap();

    let body = world.body(key).unwrap();
    assert!(body.is_static());
    let half = body.shapes()[0].shape.half_extents().unwrap();
    assert_eq!(half, Vec3::new(5.0, 3.0, PLANE_HALF_THICKNESS));
}

// ==================== Compound Body Tests ====================

/// Parts added before registration end up in the simulated body
#[test]
fn test_compound_body_parts_survive_registration() {
    let mut scene = Scene::new();
    let root = crate_at(&mut scene, Vec3::new(0.0, 2.0, 0.0));
    let arm = scene.add(VisualObject::new(cube(0.5)).with_position(Vec3::new(1.0, 0.0, 0.0)));
    let head = scene.add(VisualObject::new(Geometry::Sphere { radius: 0.3 }).with_position(Vec3::new(0.0, 1.0, 0.0)));
    let mut world = World::new(Vec3::ZERO);

    let mut body = world.new_body(&scene, root, 2.0, None).unwrap();
    body.add_part(&scene, arm, None).unwrap();
    body.add_part(&scene, head, Some(Sphere::new(0.4).into())).unwrap();
    let key = world.register(body);

    let shapes = world.body(key).unwrap().shapes();
    assert_eq!(shapes.len(), 3);
    assert_eq!(shapes[0].offset, Vec3::ZERO);
    assert_eq!(shapes[1].offset, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(shapes[2].offset, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(shapes[2].shape, Shape::Sphere(Sphere::new(0.4)));
    assert_eq!(world.visual_of(key), Some(root));
}

// ==================== Collision Group Tests ====================

/// Excluded groups never show up as broad-phase pairs
#[test]
fn test_excluded_groups_are_not_paired() {
    init_logging();
    let mut scene = Scene::new();
    let player = crate_at(&mut scene, Vec3::ZERO);
    let ghost = crate_at(&mut scene, Vec3::new(0.5, 0.0, 0.0));
    let wall = crate_at(&mut scene, Vec3::new(-0.5, 0.0, 0.0));

    let mut world = World::new(Vec3::ZERO);
    world.set_collision_groups(["player", "ghost", "wall"]).unwrap();

    let player_key = world.add_body(&scene, player, 1.0, None).unwrap();
    let ghost_key = world.add_body(&scene, ghost, 1.0, None).unwrap();
    let wall_key = world.add_body(&scene, wall, 0.0, None).unwrap();

    world.set_collisions(player_key, "player").unwrap();
    world.set_collisions(ghost_key, "ghost").unwrap();
    world.set_collisions(wall_key, "wall").unwrap();
    world.no_collisions(ghost_key, "player").unwrap();

    world.tick(&mut scene);

    let pairs = world.physics().collision_pairs();
    assert!(pairs.contains(&(player_key, wall_key)));
    assert!(pairs.contains(&(ghost_key, wall_key)));
    assert!(
        !pairs.contains(&(player_key, ghost_key)),
        "Ghost excludes the player group, so the pair must be filtered"
    );
}

/// Groups configured on an unregistered body carry into the simulation
#[test]
fn test_groups_on_unregistered_body() {
    let mut scene = Scene::new();
    let visual = crate_at(&mut scene, Vec3::ZERO);
    let mut world = World::new(Vec3::ZERO);
    world.set_collision_groups(["a", "b", "c"]).unwrap();

    let mut body = world.new_body(&scene, visual, 1.0, None).unwrap();
    body.set_collisions(world.groups(), "a").unwrap();
    body.no_collisions(world.groups(), ["b"]).unwrap();
    let key = world.register(body);

    let filter = world.body(key).unwrap().filter;
    assert_eq!(filter.group.bits(), 2);
    assert_eq!(filter.mask.bits(), 10);
}

/// Re-registering groups leaves existing bodies with their old bits
#[test]
fn test_regrouping_keeps_stale_bits() {
    let mut scene = Scene::new();
    let visual = crate_at(&mut scene, Vec3::ZERO);
    let mut world = World::new(Vec3::ZERO);
    world.set_collision_groups(["a", "b"]).unwrap();
    let key = world.add_body(&scene, visual, 1.0, None).unwrap();
    world.set_collisions(key, "b").unwrap();

    world.set_collision_groups(["b"]).unwrap();

    assert_eq!(world.body(key).unwrap().filter.group.bits(), 4);
    assert_eq!(world.groups().group_bit("b"), Ok(2));
    assert_eq!(world.groups().group_bit("a"), Err(SyncError::UnknownGroup("a".into())));
}

// ==================== Sync Loop Tests ====================

/// Falling bodies drag their visuals along
#[test]
fn test_visual_follows_falling_body() {
    init_logging();
    let mut scene = Scene::new();
    let visual = crate_at(&mut scene, Vec3::new(0.0, 10.0, 0.0));
    let mut world = World::new(Vec3::new(0.0, -9.82, 0.0));
    world.add_body(&scene, visual, 1.0, None).unwrap();

    for _ in 0..30 {
        world.tick(&mut scene);
    }

    let y = scene.get(visual).unwrap().position().y;
    assert!(y < 10.0, "Visual should fall with its body. Position y: {}", y);
}

/// Static bodies keep their visual in place
#[test]
fn test_static_body_holds_visual() {
    let mut scene = Scene::new();
    let visual = crate_at(&mut scene, Vec3::new(1.0, 2.0, 3.0));
    let mut world = World::new(Vec3::new(0.0, -9.82, 0.0));
    world.add_body(&scene, visual, 0.0, None).unwrap();

    for _ in 0..10 {
        world.tick(&mut scene);
    }

    assert_eq!(scene.get(visual).unwrap().position(), Vec3::new(1.0, 2.0, 3.0));
}

/// The simulation never writes back into visuals without a tick
#[test]
fn test_no_tick_no_write() {
    let mut scene = Scene::new();
    let visual = crate_at(&mut scene, Vec3::new(0.0, 5.0, 0.0));
    let mut world = World::new(Vec3::new(0.0, -9.82, 0.0));
    let key = world.add_body(&scene, visual, 1.0, None).unwrap();

    world.physics_mut().step(1.0);

    assert_eq!(scene.get(visual).unwrap().position(), Vec3::new(0.0, 5.0, 0.0));
    assert!(world.body(key).unwrap().position.y < 5.0);
}

/// Destroying a visual removes its body on the next tick, and only then
#[test]
fn test_destroyed_visual_prunes_body() {
    init_logging();
    let mut scene = Scene::new();
    let a = crate_at(&mut scene, Vec3::ZERO);
    let b = crate_at(&mut scene, Vec3::new(3.0, 0.0, 0.0));
    let c = crate_at(&mut scene, Vec3::new(6.0, 0.0, 0.0));
    let mut world = World::new(Vec3::new(0.0, -9.82, 0.0));
    let key_a = world.add_body(&scene, a, 1.0, None).unwrap();
    let key_b = world.add_body(&scene, b, 1.0, None).unwrap();
    let key_c = world.add_body(&scene, c, 1.0, None).unwrap();

    scene.remove(b);
    assert_eq!(world.body_count(), 3, "Removal waits for the next tick");

    let report = world.tick(&mut scene);

    assert_eq!(report.synced, 2);
    assert_eq!(report.removed.len(), 1);
    assert_eq!(report.removed[0].key, key_b);
    assert!(world.body(key_b).is_none());
    assert!(!world.physics().body_keys().any(|k| k == key_b));

    let order: Vec<_> = world.bodies().iter().map(|link| link.key).collect();
    assert_eq!(order, vec![key_a, key_c], "Registration order is preserved");
}

/// A visual reusing a destroyed object's storage does not resurrect its body
#[test]
fn test_slot_reuse_does_not_revive_body() {
    let mut scene = Scene::new();
    let old = crate_at(&mut scene, Vec3::ZERO);
    let mut world = World::new(Vec3::ZERO);
    world.add_body(&scene, old, 1.0, None).unwrap();

    scene.remove(old);
    let new = crate_at(&mut scene, Vec3::new(9.0, 9.0, 9.0));
    assert!(!scene.is_alive(old));

    let report = world.tick(&mut scene);

    assert_eq!(report.removed.len(), 1);
    assert!(world.is_empty());
    assert_eq!(scene.get(new).unwrap().position(), Vec3::new(9.0, 9.0, 9.0));
}

/// Impulses move the visual on the following ticks
#[test]
fn test_impulse_moves_visual() {
    let mut scene = Scene::new();
    let visual = crate_at(&mut scene, Vec3::ZERO);
    let mut world = World::with_time_step(Vec3::ZERO, 0.5);
    let key = world.add_body(&scene, visual, 2.0, None).unwrap();

    world.apply_central_impulse(key, Vec3::new(4.0, 0.0, 0.0), Vec3::ZERO).unwrap();
    world.tick(&mut scene);
    world.tick(&mut scene);

    // v = 2, one step of 0.5s has been written back
    let x = scene.get(visual).unwrap().position().x;
    assert!((x - 1.0).abs() < 0.0001, "Expected x = 1.0, got {}", x);
}
