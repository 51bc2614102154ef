use super::*;

fn idx(x: i64, y: i64, z: i64) -> GlobalIndex {
  GlobalIndex::new(x, y, z)
}

// IndexSet tests
#[test]
fn test_index_set_rejects_duplicates() {
  let mut set = IndexSet::new();
  assert!(set.insert(idx(1, 2, 3)));
  assert!(!set.insert(idx(1, 2, 3)));
  assert_eq!(set.len(), 1);
}

#[test]
fn test_index_set_sorted_iteration() {
  let set: IndexSet = [idx(2, 0, 0), idx(-1, 5, 5), idx(0, 0, 0)].into_iter().collect();
  assert_eq!(set.to_sorted_vec(), vec![idx(-1, 5, 5), idx(0, 0, 0), idx(2, 0, 0)]);
}

#[test]
fn test_index_set_union_and_intersection() {
  let a: IndexSet = [idx(0, 0, 0), idx(1, 0, 0)].into_iter().collect();
  let b: IndexSet = [idx(1, 0, 0), idx(2, 0, 0)].into_iter().collect();

  assert_eq!(a.union(&b).len(), 3);
  assert_eq!(a.intersection(&b).to_sorted_vec(), vec![idx(1, 0, 0)]);
  assert!(!a.is_disjoint(&b));
}

#[test]
fn test_index_set_retain() {
  let mut set: IndexSet = (0..10).map(|x| idx(x, 0, 0)).collect();
  set.retain(|i| i.x % 2 == 0);
  assert_eq!(set.len(), 5);
  assert!(set.contains(&idx(4, 0, 0)));
  assert!(!set.contains(&idx(5, 0, 0)));
}

// AABB tests
#[test]
fn test_aabb_encapsulate() {
  let mut aabb = MinMaxAABB::from_point(Vec3::new(1.0, 2.0, 3.0));
  assert_eq!(aabb.min, aabb.max);

  aabb.encapsulate(Vec3::new(0.0, 0.0, 0.0));
  aabb.encapsulate(Vec3::new(-1.0, -2.0, -3.0));

  assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, -3.0));
  assert_eq!(aabb.max, Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_aabb_contains_point_inclusive() {
  let mut aabb = MinMaxAABB::from_point(Vec3::ZERO);
  aabb.encapsulate(Vec3::splat(10.0));

  assert!(aabb.contains_point(Vec3::splat(5.0)));
  assert!(aabb.contains_point(Vec3::ZERO));
  assert!(aabb.contains_point(Vec3::splat(10.0)));
  assert!(!aabb.contains_point(Vec3::new(5.0, 5.0, 10.5)));
  assert!(!aabb.contains_point(Vec3::new(-0.5, 5.0, 5.0)));
}
