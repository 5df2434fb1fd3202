use super::*;
use crate::instructions::{Callee, Opcode};
use crate::ops::{ArithFlags, BinaryOp, CastOp, ICmpPredicate};

fn builder_with_entry() -> (IrBuilder, FunctionId, BlockId) {
    let mut builder = IrBuilder::new("test");
    let func = builder.create_function("f", Type::i32(), vec![Type::i32(), Type::i32()], false);
    let entry = builder.create_block("entry");
    builder.set_insert_point(entry);
    (builder, func, entry)
}

fn c32(value: i64) -> Constant {
    Constant::int(Type::i32(), value)
}

fn name_of(builder: &IrBuilder, inst: InstId) -> Option<&str> {
    builder.module().instruction(inst).name.as_deref()
}

#[test]
fn test_auto_names_count_up() {
    let (mut builder, _, _) = builder_with_entry();
    let a = builder.create_add(c32(1), c32(2), "");
    let b = builder.create_mul(a, c32(3), "");
    assert_eq!(name_of(&builder, a), Some("0"));
    assert_eq!(name_of(&builder, b), Some("1"));
    assert_eq!(builder.next_auto_name(), 2);
}

#[test]
fn test_explicit_names_do_not_advance_counter() {
    let (mut builder, _, _) = builder_with_entry();
    let named = builder.create_add(c32(1), c32(2), "sum");
    let auto = builder.create_add(named, c32(2), "");
    assert_eq!(name_of(&builder, named), Some("sum"));
    assert_eq!(name_of(&builder, auto), Some("0"));
}

#[test]
fn test_counter_is_shared_across_functions() {
    let (mut builder, _, _) = builder_with_entry();
    builder.create_add(c32(1), c32(2), "");

    builder.create_function("g", Type::i32(), vec![], false);
    let entry = builder.create_block("entry");
    builder.set_insert_point(entry);
    let second = builder.create_add(c32(1), c32(2), "");
    assert_eq!(name_of(&builder, second), Some("1"));
}

#[test]
fn test_config_sets_first_auto_name() {
    let config = BuilderConfig { first_auto_name: 40 };
    let mut builder = IrBuilder::with_config(Module::new("m"), config);
    builder.create_function("f", Type::Void, vec![], false);
    let entry = builder.create_block("entry");
    builder.set_insert_point(entry);
    let inst = builder.create_alloca(Type::i32(), "");
    assert_eq!(name_of(&builder, inst), Some("40"));
    assert_eq!(builder.next_auto_name(), 41);
}

#[test]
fn test_insert_before_keeps_issue_order() {
    let (mut builder, _, entry) = builder_with_entry();
    let x = builder.create_ret(c32(0));
    builder.set_insert_point_before(x).unwrap();
    let a = builder.create_add(c32(1), c32(2), "a");
    let b = builder.create_add(c32(3), c32(4), "b");
    assert_eq!(builder.module().block(entry).instructions, vec![a, b, x]);
}

#[test]
fn test_set_insert_point_returns_to_append_mode() {
    let (mut builder, _, entry) = builder_with_entry();
    let x = builder.create_add(c32(1), c32(2), "x");
    builder.set_insert_point_before(x).unwrap();
    builder.set_insert_point(entry);
    let y = builder.create_add(c32(3), c32(4), "y");
    assert_eq!(builder.module().block(entry).instructions, vec![x, y]);
}

#[test]
fn test_insert_point_tracks_function() {
    let (mut builder, func, entry) = builder_with_entry();
    let other = builder.create_function("g", Type::Void, vec![], false);
    assert_eq!(builder.current_function(), Some(other));

    builder.set_insert_point(entry);
    assert_eq!(builder.current_function(), Some(func));
    assert_eq!(builder.insert_block(), Some(entry));
}

#[test]
fn test_declare_function_keeps_current_function() {
    let (mut builder, func, _) = builder_with_entry();
    let puts = builder.declare_function("puts", Type::i32(), vec![Type::pointer(Type::i8())], false);
    assert_eq!(builder.current_function(), Some(func));
    assert!(builder.module().function(puts).is_declaration());
    assert_eq!(builder.module().function(puts).linkage, Linkage::External);
}

#[test]
fn test_block_without_function_is_detached() {
    let mut builder = IrBuilder::new("m");
    let block = builder.create_block("orphan");
    assert_eq!(builder.module().block(block).parent(), None);
}

#[test]
fn test_attached_block_makes_a_definition() {
    let mut builder = IrBuilder::new("m");
    let entry = builder.create_block("entry");
    builder.set_insert_point(entry);
    assert_eq!(builder.current_function(), None);

    let func = builder.create_function("f", Type::Void, vec![], false);
    builder.attach_block(func, entry);
    assert_eq!(builder.current_function(), Some(func));
    assert_eq!(builder.module().block(entry).parent(), Some(func));

    builder.create_ret_void();
    assert_eq!(
        builder.module().display_function(func).to_string(),
        "define external void @f() {\nentry:\n  ret void\n}"
    );
}

#[test]
fn test_branch_records_edges() {
    let (mut builder, _, entry) = builder_with_entry();
    let then_bb = builder.create_block("then");
    let else_bb = builder.create_block("else");
    let cond = builder.create_icmp_eq(c32(1), c32(1), "c");
    builder.create_cond_br(cond, then_bb, else_bb);

    let module = builder.module();
    assert_eq!(module.block(entry).successors, vec![then_bb, else_bb]);
    assert_eq!(module.block(then_bb).predecessors, vec![entry]);
    assert_eq!(module.block(else_bb).predecessors, vec![entry]);
}

#[test]
fn test_repeated_branches_keep_duplicate_edges() {
    let (mut builder, _, entry) = builder_with_entry();
    let target = builder.create_block("target");
    builder.create_br(target);
    builder.create_br(target);
    assert_eq!(builder.module().block(target).edge_count_from(entry), 2);
    assert_eq!(builder.module().block(entry).successors.len(), 2);
}

#[test]
fn test_switch_cases_add_edges() {
    let (mut builder, _, entry) = builder_with_entry();
    let default = builder.create_block("default");
    let merge = builder.create_block("merge");
    let sw = builder.create_switch(builder.arg(FunctionId::from_index(0), 0), default);
    builder.add_case(sw, c32(0), merge).unwrap();
    builder.add_case(sw, c32(1), merge).unwrap();

    let module = builder.module();
    assert_eq!(module.block(merge).edge_count_from(entry), 2);
    assert_eq!(module.block(entry).successors, vec![default, merge, merge]);
    assert_eq!(module.instruction(sw).kind.successors(), vec![default, merge, merge]);
}

#[test]
fn test_add_case_rejects_other_instructions() {
    let (mut builder, _, _) = builder_with_entry();
    let target = builder.create_block("target");
    let add = builder.create_add(c32(1), c32(2), "");
    assert_eq!(builder.add_case(add, c32(0), target), Err(IrError::NotASwitch(add)));
}

#[test]
fn test_add_incoming_rejects_other_instructions() {
    let (mut builder, _, entry) = builder_with_entry();
    let add = builder.create_add(c32(1), c32(2), "");
    assert_eq!(builder.add_incoming(add, c32(0), entry), Err(IrError::NotAPhi(add)));

    let phi = builder.create_phi(Type::i32(), "p");
    builder.add_incoming(phi, c32(0), entry).unwrap();
    let incoming = builder.module().instruction(phi).phi_incoming().map(|inc| inc.len());
    assert_eq!(incoming, Some(1));
}

#[test]
fn test_binary_result_type_follows_lhs() {
    let (mut builder, _, _) = builder_with_entry();
    let sum = builder.create_fadd(Constant::float(Type::f64(), 1.0), Constant::float(Type::f64(), 2.0), "");
    assert_eq!(builder.module().instruction(sum).ty, Type::f64());
}

#[test]
fn test_flagged_arithmetic() {
    let (mut builder, _, _) = builder_with_entry();
    let inst = builder.create_nsw_add(c32(1), c32(2), "");
    match &builder.module().instruction(inst).kind {
        InstKind::Binary { op, flags, .. } => {
            assert_eq!(*op, BinaryOp::Add);
            assert_eq!(*flags, ArithFlags::NSW);
        }
        other => panic!("expected a binary op, got {other:?}"),
    }
}

#[test]
fn test_binary_from_rejects_wrong_arity_without_naming() {
    let (mut builder, _, entry) = builder_with_entry();
    let err = builder
        .create_binary_from(BinaryOp::Sub, &[Value::from(c32(1))], "")
        .unwrap_err();
    assert_eq!(err, IrError::operand_count("sub", "2", 1));
    assert!(builder.module().block(entry).is_empty());
    assert_eq!(builder.next_auto_name(), 0);

    let ok = builder
        .create_binary_from(BinaryOp::Sub, &[c32(5).into(), c32(3).into()], "")
        .unwrap();
    assert_eq!(builder.module().instruction(ok).opcode(), Opcode::Binary(BinaryOp::Sub));
}

#[test]
fn test_memory_result_types() {
    let (mut builder, _, _) = builder_with_entry();
    let slot = builder.create_alloca(Type::i64(), "slot");
    assert_eq!(builder.module().instruction(slot).ty, Type::pointer(Type::i64()));

    let load = builder.create_load(Type::i64(), slot, "v");
    assert_eq!(builder.module().instruction(load).ty, Type::i64());

    let store = builder.create_store(Constant::int(Type::i64(), 1), slot);
    assert_eq!(builder.module().instruction(store).ty, Type::Void);
    assert_eq!(builder.module().instruction(store).name, None);
}

#[test]
fn test_gep_result_ignores_indices() {
    let (mut builder, _, _) = builder_with_entry();
    let array = Type::array(Type::i32(), 10);
    let slot = builder.create_alloca(array.clone(), "arr");
    let gep = builder.create_gep(array.clone(), slot, vec![c32(0).into(), c32(3).into()], "elem");
    assert_eq!(builder.module().instruction(gep).ty, Type::pointer(array));
}

#[test]
fn test_struct_gep_indices() {
    let (mut builder, _, _) = builder_with_entry();
    let point = Type::named_struct("Point", vec![Type::i32(), Type::i32()], false);
    let slot = builder.create_alloca(point.clone(), "p");
    let field = builder.create_struct_gep(point, slot, 1, "y");
    let operands = builder.module().instruction(field).operands();
    assert_eq!(operands.len(), 3);
    assert_eq!(operands[1], &Value::from(c32(0)));
    assert_eq!(operands[2], &Value::from(c32(1)));
}

#[test]
fn test_cast_and_compare_types() {
    let (mut builder, func, _) = builder_with_entry();
    let wide = builder.create_sext(builder.arg(func, 0), Type::i64(), "");
    assert_eq!(builder.module().instruction(wide).ty, Type::i64());
    assert_eq!(builder.module().instruction(wide).opcode(), Opcode::Cast(CastOp::SExt));

    let cmp = builder.create_icmp(ICmpPredicate::Slt, builder.arg(func, 0), c32(0), "");
    assert_eq!(builder.module().instruction(cmp).ty, Type::i1());
}

#[test]
fn test_void_call_is_not_auto_named() {
    let (mut builder, _, _) = builder_with_entry();
    let callee = builder.declare_function("log", Type::Void, vec![], false);
    let call = builder.create_call(callee, vec![], "");
    assert_eq!(name_of(&builder, call), None);
    assert_eq!(builder.next_auto_name(), 0);

    let named = builder.create_call_by_name("ext", Type::i32(), vec![], "");
    assert_eq!(name_of(&builder, named), Some("0"));
}

#[test]
fn test_resolve_callee() {
    let (builder, func, _) = builder_with_entry();
    assert_eq!(builder.resolve_callee("f"), Ok(Callee::Direct(func)));
    assert_eq!(
        builder.resolve_callee("missing"),
        Err(IrError::UnknownFunction("missing".to_string()))
    );
}

#[test]
fn test_select_and_aggregate_types() {
    let (mut builder, _, _) = builder_with_entry();
    let sel = builder.create_select(builder.const_true(), c32(1), c32(2), "");
    assert_eq!(builder.module().instruction(sel).ty, Type::i32());

    let pair = Type::anonymous_struct(vec![Type::i32(), Type::f64()], false);
    let agg = builder.const_undef(pair.clone());
    let inserted = builder.create_insert_value(agg, c32(7), vec![0], "");
    let extracted = builder.create_extract_value(inserted, vec![0], "");
    assert_eq!(builder.module().instruction(inserted).ty, pair);
    assert_eq!(builder.module().instruction(extracted).ty, pair);
}

#[test]
fn test_global_constant_takes_initializer_type() {
    let mut builder = IrBuilder::new("m");
    let table = builder.const_array(Type::i32(), vec![c32(1), c32(2)]);
    let id = builder.create_global_constant("table", table);
    let global = builder.module().global(id);
    assert!(global.is_constant);
    assert_eq!(global.value_type, Type::array(Type::i32(), 2));
}

#[test]
#[should_panic(expected = "no insertion block set")]
fn test_insert_without_block_panics() {
    let mut builder = IrBuilder::new("m");
    builder.create_function("f", Type::Void, vec![], false);
    builder.create_ret_void();
}
