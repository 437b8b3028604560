//! Program fixtures
//!
//! Each fixture builds a small program with [`ProgramBuilder`] and hands
//! back the handles the tests query.

use codegraph_pta::shared::models::{
    BinaryOp, CallKind, ClassId, MethodId, MethodModifiers, MethodRef, Program, ProgramBuilder, Stmt,
    StmtId, Type, VarId,
};

/// Virtual dispatch over a three-class hierarchy
///
/// ```text
/// class A { int m() { r = 1; return r; } }
/// class B extends A { int m() { r = 2; return r; } }
/// class C extends A { int m() { r = 3; return r; } }
/// main: a = new B; x = a.m(); nop
/// ```
pub struct DispatchFixture {
    pub program: Program,
    pub main: MethodId,
    pub call_site: StmtId,
    pub after_call: StmtId,
    pub receiver: VarId,
    pub result: VarId,
    pub a_m: MethodId,
    pub b_m: MethodId,
    pub c_m: MethodId,
}

pub fn fixture_dispatch() -> DispatchFixture {
    let mut b = ProgramBuilder::new();
    let a = b.add_class("A", None);
    let bc = b.add_class("B", Some(a));
    let c = b.add_class("C", Some(a));

    let returning = |b: &mut ProgramBuilder, class: ClassId, value: i32| {
        let m = b.add_method(class, "m", &[], Type::INT, MethodModifiers::INSTANCE);
        let r = b.add_var(m, "r", Type::INT);
        b.assign_int(m, r, value);
        b.ret(m, Some(r));
        m
    };
    let a_m = returning(&mut b, a, 1);
    let b_m = returning(&mut b, bc, 2);
    let c_m = returning(&mut b, c, 3);

    let main = b.add_method(a, "main", &[], Type::Void, MethodModifiers::STATIC);
    let receiver = b.add_var(main, "a", Type::class(a));
    let result = b.add_var(main, "x", Type::INT);
    b.alloc(main, receiver, Type::class(bc));
    let call_site = b.invoke(
        main,
        Some(result),
        CallKind::Virtual,
        MethodRef::new(a, "m()"),
        Some(receiver),
        &[],
    );
    let after_call = b.push_stmt(main, Stmt::Nop);
    b.add_entry_method(main);

    DispatchFixture {
        program: b.build().expect("dispatch fixture"),
        main,
        call_site,
        after_call,
        receiver,
        result,
        a_m,
        b_m,
        c_m,
    }
}

/// Container precision
///
/// ```text
/// class Box { A v; set(A o) { this.v = o; } A get() { t = this.v; return t; } }
/// main: b1 = new Box; b2 = new Box; o1 = new A; o2 = new A;
///       b1.set(o1); b2.set(o2); r1 = b1.get(); r2 = b2.get();
/// ```
pub struct BoxFixture {
    pub program: Program,
    pub r1: VarId,
    pub r2: VarId,
    pub o1_site: StmtId,
    pub o2_site: StmtId,
    pub set_this: VarId,
}

pub fn fixture_boxes() -> BoxFixture {
    let mut b = ProgramBuilder::new();
    let a = b.add_class("A", None);
    let bx = b.add_class("Box", None);
    let v = b.add_field(bx, "v", Type::class(a), false);

    let set = b.add_method(bx, "set", &[("o", Type::class(a))], Type::Void, MethodModifiers::INSTANCE);
    let set_this = b.this_var(set).expect("instance method");
    let o = b.param(set, 0);
    b.push_stmt(set, Stmt::StoreField { base: Some(set_this), field: v, rvalue: o });

    let get = b.add_method(bx, "get", &[], Type::class(a), MethodModifiers::INSTANCE);
    let get_this = b.this_var(get).expect("instance method");
    let t = b.add_var(get, "t", Type::class(a));
    b.push_stmt(get, Stmt::LoadField { lvalue: t, base: Some(get_this), field: v });
    b.ret(get, Some(t));

    let main = b.add_method(a, "main", &[], Type::Void, MethodModifiers::STATIC);
    let b1 = b.add_var(main, "b1", Type::class(bx));
    let b2 = b.add_var(main, "b2", Type::class(bx));
    let o1 = b.add_var(main, "o1", Type::class(a));
    let o2 = b.add_var(main, "o2", Type::class(a));
    let r1 = b.add_var(main, "r1", Type::class(a));
    let r2 = b.add_var(main, "r2", Type::class(a));
    b.alloc(main, b1, Type::class(bx));
    b.alloc(main, b2, Type::class(bx));
    let o1_site = b.alloc(main, o1, Type::class(a));
    let o2_site = b.alloc(main, o2, Type::class(a));
    let set_ref = b.method_ref(set);
    let get_ref = b.method_ref(get);
    b.invoke(main, None, CallKind::Virtual, set_ref.clone(), Some(b1), &[o1]);
    b.invoke(main, None, CallKind::Virtual, set_ref, Some(b2), &[o2]);
    b.invoke(main, Some(r1), CallKind::Virtual, get_ref.clone(), Some(b1), &[]);
    b.invoke(main, Some(r2), CallKind::Virtual, get_ref, Some(b2), &[]);
    b.add_entry_method(main);

    BoxFixture {
        program: b.build().expect("box fixture"),
        r1,
        r2,
        o1_site,
        o2_site,
        set_this,
    }
}

/// Static field and array flow
///
/// ```text
/// class G { static A f; }
/// main: o = new A; G.f = o; arr = new A[]; i = 0; arr[i] = o;
///       e = arr[i]; read();
/// static read(): r = G.f; return r;
/// ```
pub struct HeapFixture {
    pub program: Program,
    pub alloc_site: StmtId,
    pub array_site: StmtId,
    pub array: VarId,
    pub element: VarId,
    pub static_read: VarId,
}

pub fn fixture_heap() -> HeapFixture {
    let mut b = ProgramBuilder::new();
    let a = b.add_class("A", None);
    let g = b.add_class("G", None);
    let f = b.add_field(g, "f", Type::class(a), true);

    let read = b.add_method(g, "read", &[], Type::class(a), MethodModifiers::STATIC);
    let static_read = b.add_var(read, "r", Type::class(a));
    b.push_stmt(read, Stmt::LoadField { lvalue: static_read, base: None, field: f });
    b.ret(read, Some(static_read));

    let main = b.add_method(g, "main", &[], Type::Void, MethodModifiers::STATIC);
    let o = b.add_var(main, "o", Type::class(a));
    let array_ty = Type::array_of(Type::class(a));
    let array = b.add_var(main, "arr", array_ty.clone());
    let i = b.add_var(main, "i", Type::INT);
    let element = b.add_var(main, "e", Type::class(a));
    let alloc_site = b.alloc(main, o, Type::class(a));
    b.push_stmt(main, Stmt::StoreField { base: None, field: f, rvalue: o });
    let array_site = b.alloc(main, array, array_ty);
    b.assign_int(main, i, 0);
    b.push_stmt(main, Stmt::StoreArray { base: array, index: i, rvalue: o });
    b.push_stmt(main, Stmt::LoadArray { lvalue: element, base: array, index: i });
    let read_ref = b.method_ref(read);
    b.invoke(main, None, CallKind::Static, read_ref, None, &[]);
    b.add_entry_method(main);

    HeapFixture {
        program: b.build().expect("heap fixture"),
        alloc_site,
        array_site,
        array,
        element,
        static_read,
    }
}

/// Unbounded recursion
///
/// ```text
/// static A rec(A p) { t = rec(p); return p; }
/// main: o = new A; r = rec(o);
/// ```
pub struct RecursionFixture {
    pub program: Program,
    pub rec: MethodId,
    pub param: VarId,
    pub result: VarId,
    pub alloc_site: StmtId,
}

pub fn fixture_recursion() -> RecursionFixture {
    let mut b = ProgramBuilder::new();
    let a = b.add_class("A", None);
    let rec = b.add_method(a, "rec", &[("p", Type::class(a))], Type::class(a), MethodModifiers::STATIC);
    let param = b.param(rec, 0);
    let t = b.add_var(rec, "t", Type::class(a));
    let rec_ref = b.method_ref(rec);
    b.invoke(rec, Some(t), CallKind::Static, rec_ref.clone(), None, &[param]);
    b.ret(rec, Some(param));

    let main = b.add_method(a, "main", &[], Type::Void, MethodModifiers::STATIC);
    let o = b.add_var(main, "o", Type::class(a));
    let result = b.add_var(main, "r", Type::class(a));
    let alloc_site = b.alloc(main, o, Type::class(a));
    b.invoke(main, Some(result), CallKind::Static, rec_ref, None, &[o]);
    b.add_entry_method(main);

    RecursionFixture {
        program: b.build().expect("recursion fixture"),
        rec,
        param,
        result,
        alloc_site,
    }
}

/// Identity through a static call from one or two call sites
///
/// ```text
/// static int id(int p) { return p; }
/// main: a = 7; x = id(a); [b = 8; y = id(b);] nop
/// ```
pub struct IdentityFixture {
    pub program: Program,
    pub x: VarId,
    pub y: Option<VarId>,
    pub last: StmtId,
}

pub fn fixture_identity(second_call: bool) -> IdentityFixture {
    let mut b = ProgramBuilder::new();
    let k = b.add_class("K", None);
    let id = b.add_method(k, "id", &[("p", Type::INT)], Type::INT, MethodModifiers::STATIC);
    let p = b.param(id, 0);
    b.ret(id, Some(p));

    let main = b.add_method(k, "main", &[], Type::Void, MethodModifiers::STATIC);
    let a = b.add_var(main, "a", Type::INT);
    let x = b.add_var(main, "x", Type::INT);
    let id_ref = b.method_ref(id);
    b.assign_int(main, a, 7);
    b.invoke(main, Some(x), CallKind::Static, id_ref.clone(), None, &[a]);
    let y = second_call.then(|| {
        let bv = b.add_var(main, "b", Type::INT);
        let y = b.add_var(main, "y", Type::INT);
        b.assign_int(main, bv, 8);
        b.invoke(main, Some(y), CallKind::Static, id_ref, None, &[bv]);
        y
    });
    let last = b.push_stmt(main, Stmt::Nop);
    b.add_entry_method(main);

    IdentityFixture {
        program: b.build().expect("identity fixture"),
        x,
        y,
        last,
    }
}

/// Straight-line arithmetic in a single static method
///
/// ```text
/// static void f(int p) { x = 1; y = 2; z = x + y; w = z * p; zero = 0; q = x / zero; }
/// ```
pub struct ArithmeticFixture {
    pub program: Program,
    pub method: MethodId,
    pub z: VarId,
    pub w: VarId,
    pub q: VarId,
}

pub fn fixture_arithmetic() -> ArithmeticFixture {
    let mut b = ProgramBuilder::new();
    let k = b.add_class("K", None);
    let method = b.add_method(k, "f", &[("p", Type::INT)], Type::Void, MethodModifiers::STATIC);
    let p = b.param(method, 0);
    let var = |b: &mut ProgramBuilder, name: &str| b.add_var(method, name, Type::INT);
    let x = var(&mut b, "x");
    let y = var(&mut b, "y");
    let z = var(&mut b, "z");
    let w = var(&mut b, "w");
    let zero = var(&mut b, "zero");
    let q = var(&mut b, "q");
    b.assign_int(method, x, 1);
    b.assign_int(method, y, 2);
    b.push_stmt(method, binary(z, BinaryOp::Add, x, y));
    b.push_stmt(method, binary(w, BinaryOp::Mul, z, p));
    b.assign_int(method, zero, 0);
    b.push_stmt(method, binary(q, BinaryOp::Div, x, zero));

    ArithmeticFixture {
        program: b.build().expect("arithmetic fixture"),
        method,
        z,
        w,
        q,
    }
}

/// Branch merge
///
/// ```text
/// static void f(int p) {
///   0: zero = 0
///   1: if (p > zero) goto 4
///   2: x = 1
///   3: goto 5
///   4: x = 2
///   5: y = x
/// }
/// ```
pub struct DiamondFixture {
    pub program: Program,
    pub method: MethodId,
    pub merge: StmtId,
    pub x: VarId,
    pub y: VarId,
}

pub fn fixture_diamond() -> DiamondFixture {
    let mut b = ProgramBuilder::new();
    let k = b.add_class("K", None);
    let method = b.add_method(k, "f", &[("p", Type::INT)], Type::Void, MethodModifiers::STATIC);
    let p = b.param(method, 0);
    let zero = b.add_var(method, "zero", Type::INT);
    let x = b.add_var(method, "x", Type::INT);
    let y = b.add_var(method, "y", Type::INT);
    b.assign_int(method, zero, 0);
    b.push_stmt(method, Stmt::If { op: BinaryOp::Gt, operand1: p, operand2: zero, target: 4 });
    b.assign_int(method, x, 1);
    b.push_stmt(method, Stmt::Goto { target: 5 });
    b.assign_int(method, x, 2);
    let merge = b.copy(method, y, x);

    DiamondFixture {
        program: b.build().expect("diamond fixture"),
        method,
        merge,
        x,
        y,
    }
}

pub fn binary(lvalue: VarId, op: BinaryOp, operand1: VarId, operand2: VarId) -> Stmt {
    Stmt::Binary { lvalue, op, operand1, operand2 }
}
